use nyaya_core::error::AppError;

/// Embedding model boundary. Deterministic given model identity, and invoked
/// identically at build and query time.
pub trait Embedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError>;

    /// Sequential batch; providers with a native batch endpoint can override.
    fn embed_batch(&self, model: &str, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        let mut out = Vec::with_capacity(inputs.len());
        for input in inputs {
            out.push(self.embed(model, input)?);
        }
        Ok(out)
    }
}

pub mod ollama_embed;
