use nyaya_core::error::AppError;

#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the local embedding server. Strictly limited to
    /// `127.0.0.1`; embeddings never leave the machine.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !Self::is_local(&base_url) {
            return Err(AppError::new(
                "AI_REMOTE_NOT_ALLOWED",
                "Embedding server base URL must be localhost (127.0.0.1)",
            )
            .with_details(format!("base_url={base_url}")));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Binding constraint: local-only via 127.0.0.1, with at most a bare
    /// port after the host. No paths, no userinfo tricks, no lookalikes.
    fn is_local(base_url: &str) -> bool {
        if base_url == "http://127.0.0.1" {
            return true;
        }
        match base_url.strip_prefix("http://127.0.0.1:") {
            Some(port) => matches!(port.parse::<u32>(), Ok(p) if (1..=65535).contains(&p)),
            None => false,
        }
    }

    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = ureq::get(&url)
            .timeout(std::time::Duration::from_millis(800))
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(AppError::new(
                "AI_EMBED_SERVER_UNHEALTHY",
                "Embedding server health check failed",
            )
            .with_details(format!("status={}", r.status()))),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "AI_EMBED_SERVER_UNHEALTHY",
                "Embedding server health check failed",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(AppError::new(
                "AI_EMBED_SERVER_UNREACHABLE",
                "Failed to reach the embedding server on 127.0.0.1",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
