use std::env;

use nyaya_core::error::AppError;

/// Groq's OpenAI-compatible chat completions endpoint.
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Credentials holder for the hosted LLM. Construction fails when no key is
/// available, so a missing key degrades the assistant at wiring time instead
/// of failing mid-question.
#[derive(Debug, Clone)]
pub struct GroqClient {
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::new(
                "AI_AUTH_MISSING",
                "Groq API key must not be empty",
            ));
        }
        Ok(Self { api_key })
    }

    /// Read the key from `GROQ_API_KEY`.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("GROQ_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Self::new(key),
            _ => Err(AppError::new(
                "AI_AUTH_MISSING",
                "GROQ_API_KEY is not set; answer synthesis is unavailable",
            )),
        }
    }

    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.api_key.trim())
    }
}
