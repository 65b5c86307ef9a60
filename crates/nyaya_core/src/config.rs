use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Engine configuration. Defaults match the deployed assistant; every knob
/// the retrieval pipeline tunes per corpus is explicit here rather than
/// derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Chat model used for answer synthesis (Groq-hosted).
    pub groq_model: String,
    /// Base URL of the local embedding server.
    pub embed_base_url: String,
    /// Embedding model name, identical at build and query time.
    pub embed_model: String,
    /// Ordered knowledge-base candidate directories; first loadable wins.
    pub kb_paths: Vec<PathBuf>,
    /// Retrieval depth per question.
    pub top_k: usize,
    /// Relevance floor for the comprehensive statute corpus. Looser than the
    /// document threshold: recall matters more than precision there.
    pub statute_score_threshold: f32,
    /// Relevance floor for mixed-domain document corpora.
    pub document_score_threshold: f32,
    /// Sampling temperature for answer synthesis.
    pub temperature: f32,
    /// Output token budget for answer synthesis.
    pub max_tokens: usize,
    /// Display bound for a single context block before truncation.
    pub max_snippet_chars: usize,
    /// Minimum paragraph length kept when chunking loose documents.
    pub min_chunk_chars: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            groq_model: "llama-3.1-8b-instant".to_string(),
            embed_base_url: "http://127.0.0.1:11434".to_string(),
            embed_model: "all-minilm".to_string(),
            kb_paths: vec![
                PathBuf::from("knowledge_base/ipc_complete"),
                PathBuf::from("knowledge_base/legal_docs"),
            ],
            top_k: 5,
            statute_score_threshold: 0.1,
            document_score_threshold: 0.2,
            temperature: 0.1,
            max_tokens: 1024,
            max_snippet_chars: 800,
            min_chunk_chars: 100,
        }
    }
}

impl AiConfig {
    /// Defaults overlaid with environment variables when set. The Groq API
    /// key is deliberately not part of the config; the client reads it.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("GROQ_MODEL") {
            if !v.is_empty() {
                cfg.groq_model = v;
            }
        }
        if let Ok(v) = env::var("NYAYA_EMBED_URL") {
            if !v.is_empty() {
                cfg.embed_base_url = v;
            }
        }
        if let Ok(v) = env::var("NYAYA_EMBED_MODEL") {
            if !v.is_empty() {
                cfg.embed_model = v;
            }
        }
        if let Ok(v) = env::var("NYAYA_KB_PATH") {
            if !v.is_empty() {
                // Highest-priority candidate; the defaults stay as fallback.
                cfg.kb_paths.insert(0, PathBuf::from(v));
            }
        }
        cfg
    }
}
