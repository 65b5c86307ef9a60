pub mod config;
pub mod corpus;
pub mod error;

#[cfg(test)]
mod tests {
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("KB_TEST", "kb failed").with_retryable(true);
        assert_eq!(err.code, "KB_TEST");
        assert_eq!(err.message, "kb failed");
        assert!(err.retryable);
        assert!(err.is_code("KB_TEST"));
        assert_eq!(format!("{err}"), "[KB_TEST] kb failed");
    }
}
