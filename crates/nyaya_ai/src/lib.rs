pub mod answer;
pub mod context;
pub mod embeddings;
pub mod groq;
pub mod kb;
pub mod llm;
pub mod ollama;
pub mod retrieve;

#[cfg(test)]
mod tests {
    use super::groq::GroqClient;
    use super::ollama::OllamaClient;

    #[test]
    fn enforces_localhost_only_embed_base_url() {
        assert!(OllamaClient::new("http://127.0.0.1:11434").is_ok());
        assert!(OllamaClient::new("http://127.0.0.1").is_ok());
        assert!(OllamaClient::new("http://127.0.0.1:11434/").is_ok()); // trailing slash is trimmed

        assert!(OllamaClient::new("http://localhost:11434").is_err());
        assert!(OllamaClient::new("http://0.0.0.0:11434").is_err());
        assert!(OllamaClient::new("https://example.com").is_err());

        // Harden against prefix-based bypasses.
        assert!(OllamaClient::new("http://127.0.0.1.evil.com:11434").is_err());
        assert!(OllamaClient::new("http://127.0.0.1@evil.com:11434").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:0").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:99999").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:11434/api").is_err());
    }

    #[test]
    fn groq_client_rejects_empty_keys() {
        assert!(GroqClient::new("gsk_test").is_ok());
        let err = GroqClient::new("   ").unwrap_err();
        assert_eq!(err.code, "AI_AUTH_MISSING");
    }
}
