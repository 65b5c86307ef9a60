use nyaya_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Llm;
use crate::groq::{GroqClient, GROQ_CHAT_URL};

#[derive(Debug, Clone)]
pub struct GroqLlm {
    client: GroqClient,
}

impl GroqLlm {
    pub fn new(client: GroqClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: usize,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct AssistantMessage {
    content: String,
}

impl Llm for GroqLlm {
    fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String, AppError> {
        let req = ChatRequest {
            model,
            temperature,
            max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = ureq::post(GROQ_CHAT_URL)
            .set("Authorization", &self.client.bearer_header())
            .timeout(std::time::Duration::from_secs(30))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("AI_ANSWER_FAILED", "Failed to encode chat request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) => {
                let v: ChatResponse = r.into_json().map_err(|e| {
                    AppError::new("AI_ANSWER_FAILED", "Failed to decode chat response")
                        .with_details(e.to_string())
                })?;
                let answer = v
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .unwrap_or_default();
                if answer.trim().is_empty() {
                    return Err(AppError::new("AI_ANSWER_FAILED", "Chat response was empty"));
                }
                Ok(answer)
            }
            Err(ureq::Error::Status(code, r)) => {
                let body = r.into_string().unwrap_or_default();
                Err(AppError::new("AI_ANSWER_FAILED", "Chat request failed")
                    .with_details(format!("status={code}; body={body}"))
                    .with_retryable(code == 429))
            }
            Err(e) => Err(AppError::new(
                "AI_ANSWER_FAILED",
                "Failed to call chat endpoint",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
