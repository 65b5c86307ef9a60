use nyaya_core::corpus::{Record, RecordMeta, TEXT_TEMPLATE_VERSION};
use nyaya_core::error::AppError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::embeddings::Embedder;
use crate::retrieve::similarity::normalize;

pub mod index;
pub mod store;

pub use index::{FlatIpIndex, VectorIndex};
pub use store::{load_first, KbStore};

/// The load-once, read-only unit the search engine serves from. Invariant:
/// `index`, `texts`, and `metas` are index-aligned; row i of each describes
/// the same source record.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub index: FlatIpIndex,
    pub texts: Vec<String>,
    pub metas: Vec<RecordMeta>,
}

impl KnowledgeBase {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }
}

/// Persisted metadata file: everything but the vectors, plus enough
/// provenance to verify a load (template revision, corpus fingerprint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbManifest {
    pub texts: Vec<String>,
    pub metas: Vec<RecordMeta>,
    pub dimension: u32,
    pub record_count: u32,
    pub template_version: String,
    pub corpus_sha256: String,
    pub built_at: String,
}

/// Embed every record, normalize to unit L2 norm, and assemble the index.
///
/// Normalization is load-bearing: the search engine scores by inner product,
/// which equals cosine similarity only on unit vectors. Any embedding model
/// substitution must keep this step at both build and query time.
pub fn build_knowledge_base(
    records: &[Record],
    embedder: &dyn Embedder,
    model: &str,
) -> Result<(KnowledgeBase, KbManifest), AppError> {
    if records.is_empty() {
        return Err(AppError::new(
            "CORPUS_EMPTY",
            "Refusing to build a knowledge base from zero records",
        ));
    }

    let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(records.len());
    let mut dimension: Option<usize> = None;

    for (i, record) in records.iter().enumerate() {
        let mut v = embedder.embed(model, &record.text).map_err(|e| {
            AppError::new("AI_EMBEDDINGS_FAILED", "Failed to embed corpus record")
                .with_details(format!("record={i}; err={e}"))
                .with_retryable(e.retryable)
        })?;
        match dimension {
            Some(d) if d != v.len() => {
                return Err(AppError::new(
                    "KB_BUILD_FAILED",
                    "Embedding dimension mismatch across records",
                )
                .with_details(format!("expected={d}; got={}; record={i}", v.len())));
            }
            None => dimension = Some(v.len()),
            _ => {}
        }
        normalize(&mut v);
        vectors.push(v);
    }

    let dimension = dimension.unwrap_or(0);
    let index = FlatIpIndex::from_vectors(dimension, vectors)?;

    let manifest = KbManifest {
        texts: records.iter().map(|r| r.text.clone()).collect(),
        metas: records.iter().map(|r| r.meta.clone()).collect(),
        dimension: dimension as u32,
        record_count: records.len() as u32,
        template_version: TEXT_TEMPLATE_VERSION.to_string(),
        corpus_sha256: corpus_fingerprint(records),
        built_at: now_rfc3339_utc()?,
    };

    let kb = KnowledgeBase {
        index,
        texts: manifest.texts.clone(),
        metas: manifest.metas.clone(),
    };
    Ok((kb, manifest))
}

/// SHA-256 over the record texts in corpus order, NUL-separated so that
/// record boundaries cannot alias.
fn corpus_fingerprint(records: &[Record]) -> String {
    let mut hasher = Sha256::new();
    for r in records {
        hasher.update(r.text.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

fn now_rfc3339_utc() -> Result<String, AppError> {
    OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| {
        AppError::new("KB_BUILD_FAILED", "Failed to format build timestamp")
            .with_details(e.to_string())
    })
}
