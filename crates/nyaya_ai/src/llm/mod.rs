use nyaya_core::error::AppError;

/// LLM boundary: an opaque text-completion call. May fail on authentication,
/// rate limits, or transient network errors; retry policy is the caller's.
pub trait Llm {
    fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String, AppError>;
}

pub mod groq_llm;
