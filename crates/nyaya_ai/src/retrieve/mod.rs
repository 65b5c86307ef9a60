use std::path::PathBuf;

use nyaya_core::corpus::RecordMeta;
use nyaya_core::error::AppError;
use serde::{Deserialize, Serialize};

use crate::embeddings::Embedder;
use crate::kb::{load_first, KbStore, KnowledgeBase, VectorIndex};

pub(crate) mod similarity;

/// One scored retrieval candidate. Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub record_index: usize,
    pub content: String,
    pub meta: RecordMeta,
    pub score: f32,
}

#[derive(Debug)]
enum LoadState {
    NotTried,
    Ready(KnowledgeBase),
    Failed,
}

/// Query-side engine. The knowledge base is loaded once (eagerly via
/// `load`, or lazily on the first `search`) and is read-only afterwards;
/// one failed lazy attempt is never retried by the engine itself.
pub struct SearchEngine {
    embedder: Box<dyn Embedder>,
    model: String,
    candidates: Vec<KbStore>,
    state: LoadState,
    loaded_from: Option<PathBuf>,
}

impl SearchEngine {
    pub fn new(embedder: Box<dyn Embedder>, model: impl Into<String>, kb_dirs: Vec<PathBuf>) -> Self {
        Self {
            embedder,
            model: model.into(),
            candidates: kb_dirs.into_iter().map(KbStore::open).collect(),
            state: LoadState::NotTried,
            loaded_from: None,
        }
    }

    /// Walk the candidate paths in order; first loadable knowledge base
    /// wins. Recoverable: callers may rebuild and call again.
    pub fn load(&mut self) -> Result<PathBuf, AppError> {
        match load_first(&self.candidates) {
            Ok((kb, dir)) => {
                self.state = LoadState::Ready(kb);
                self.loaded_from = Some(dir.clone());
                Ok(dir)
            }
            Err(e) => {
                self.state = LoadState::Failed;
                Err(e)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    pub fn loaded_from(&self) -> Option<&PathBuf> {
        self.loaded_from.as_ref()
    }

    /// Top-`k` records by inner-product similarity, score descending, ties
    /// broken by ascending record index. Empty and whitespace-only queries
    /// are forwarded to the embedding model like any other input.
    pub fn search(&mut self, query: &str, k: usize) -> Result<Vec<SearchResult>, AppError> {
        if matches!(self.state, LoadState::NotTried) {
            // Single implicit attempt; a failure parks the engine in the
            // Failed state rather than retrying on every call.
            let _ = self.load();
        }
        let kb = match &self.state {
            LoadState::Ready(kb) => kb,
            _ => {
                return Err(AppError::new(
                    "KB_NOT_FOUND",
                    "No knowledge base loaded; build one or point the engine at an existing path",
                ))
            }
        };

        let mut qv = self.embedder.embed(&self.model, query).map_err(|e| {
            AppError::new("AI_RETRIEVAL_FAILED", "Failed to embed query")
                .with_details(e.to_string())
                .with_retryable(e.retryable)
        })?;
        if qv.len() != kb.dimension() {
            return Err(AppError::new(
                "AI_RETRIEVAL_FAILED",
                "Query embedding dimension does not match the knowledge base",
            )
            .with_details(format!("kb={}; query={}", kb.dimension(), qv.len())));
        }
        similarity::normalize(&mut qv);

        let hits = kb.index.search(&qv, k);
        Ok(hits
            .into_iter()
            .map(|(i, score)| SearchResult {
                record_index: i,
                content: kb.texts[i].clone(),
                meta: kb.metas[i].clone(),
                score,
            })
            .collect())
    }
}
