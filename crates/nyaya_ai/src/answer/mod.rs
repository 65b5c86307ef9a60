use nyaya_core::config::AiConfig;
use nyaya_core::error::AppError;

use crate::context::{assemble_context, ContextOptions};
use crate::embeddings::ollama_embed::OllamaEmbedder;
use crate::groq::GroqClient;
use crate::llm::groq_llm::GroqLlm;
use crate::llm::Llm;
use crate::ollama::OllamaClient;
use crate::retrieve::SearchEngine;

mod prompts;

/// Fixed response when a dependency failed to initialize or no knowledge
/// base could be loaded.
pub const UNAVAILABLE_MESSAGE: &str =
    "The legal assistant is not available right now. Please check that the knowledge base is built and the language model is configured.";

/// Fixed response when retrieval finds nothing relevant; the LLM is never
/// invoked in this case.
pub const NO_CONTEXT_MESSAGE: &str =
    "I couldn't find relevant statutory provisions for your question. Please try asking about a specific section or offence.";

/// Retrieval-augmented orchestrator: retrieve, assemble, generate. Holds its
/// dependencies as options so a failed construction degrades every answer to
/// a fixed message instead of failing the host process.
pub struct Assistant {
    engine: Option<SearchEngine>,
    llm: Option<Box<dyn Llm>>,
    config: AiConfig,
}

impl Assistant {
    /// Wire the real components. Initialization failures are recorded, not
    /// raised; the assistant then answers in degraded mode.
    pub fn new(config: AiConfig) -> Self {
        let engine = OllamaClient::new(&config.embed_base_url).ok().map(|client| {
            SearchEngine::new(
                Box::new(OllamaEmbedder::new(client)),
                config.embed_model.clone(),
                config.kb_paths.clone(),
            )
        });
        let llm: Option<Box<dyn Llm>> = GroqClient::from_env()
            .ok()
            .map(|client| Box::new(GroqLlm::new(client)) as Box<dyn Llm>);
        Self::with_parts(engine, llm, config)
    }

    /// Dependency-injected constructor; tests and alternative providers use
    /// this directly.
    pub fn with_parts(
        engine: Option<SearchEngine>,
        llm: Option<Box<dyn Llm>>,
        config: AiConfig,
    ) -> Self {
        Self { engine, llm, config }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some() && self.llm.is_some()
    }

    /// Answer a legal question. Every failure path folds into the returned
    /// string; this never panics and never returns an error type.
    pub fn ask(&mut self, query: &str) -> String {
        let (engine, llm) = match (self.engine.as_mut(), self.llm.as_ref()) {
            (Some(engine), Some(llm)) => (engine, llm),
            _ => return UNAVAILABLE_MESSAGE.to_string(),
        };

        let results = match engine.search(query, self.config.top_k) {
            Ok(results) => results,
            // Retrieval failures (no knowledge base, embedding server down)
            // are unavailability, not an empty answer.
            Err(_) => return UNAVAILABLE_MESSAGE.to_string(),
        };

        let context = assemble_context(
            &results,
            &ContextOptions {
                score_threshold: self.config.statute_score_threshold,
                max_snippet_chars: self.config.max_snippet_chars,
            },
        );
        if context.is_empty() {
            return NO_CONTEXT_MESSAGE.to_string();
        }

        let prompt = prompts::legal_answer_prompt(context.text(), query);
        match llm.complete(
            &self.config.groq_model,
            &prompt,
            self.config.temperature,
            self.config.max_tokens,
        ) {
            Ok(answer) => answer,
            Err(e) => generation_failure_message(&e),
        }
    }
}

fn generation_failure_message(e: &AppError) -> String {
    match &e.details {
        Some(details) => format!("Legal information service error: {e} ({details})"),
        None => format!("Legal information service error: {e}"),
    }
}
