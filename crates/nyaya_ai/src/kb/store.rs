use std::fs;
use std::path::{Path, PathBuf};

use nyaya_core::corpus::TEXT_TEMPLATE_VERSION;
use nyaya_core::error::AppError;
use serde::Serialize;

use super::index::FlatIpIndex;
use super::{KbManifest, KnowledgeBase};

/// Durable layout of one knowledge base: two co-located JSON artifacts under
/// a base directory.
///
/// Write order is part of the contract: the manifest lands before the
/// vectors, each via tmp-then-rename, so a reader whose existence check finds
/// `kb_vectors.json` is guaranteed a complete manifest next to it.
#[derive(Debug, Clone)]
pub struct KbStore {
    dir: PathBuf,
}

impl KbStore {
    pub fn open(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join("kb_manifest.json")
    }

    fn vectors_path(&self) -> PathBuf {
        self.dir.join("kb_vectors.json")
    }

    /// Cheap readiness probe; see the write-order note above.
    pub fn exists(&self) -> bool {
        self.vectors_path().exists()
    }

    pub fn save(&self, kb: &KnowledgeBase, manifest: &KbManifest) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::new("KB_PERSIST_FAILED", "Failed to create knowledge base directory")
                .with_details(format!("path={}; err={}", self.dir.display(), e))
        })?;

        self.write_json_atomic(&self.manifest_path(), manifest, "manifest")?;
        self.write_json_atomic(&self.vectors_path(), &kb.index.vectors(), "vectors")?;
        Ok(())
    }

    pub fn load(&self) -> Result<KnowledgeBase, AppError> {
        let manifest_path = self.manifest_path();
        let vectors_path = self.vectors_path();
        if !manifest_path.exists() || !vectors_path.exists() {
            return Err(AppError::new(
                "KB_NOT_FOUND",
                "Knowledge base files are missing",
            )
            .with_details(format!("path={}", self.dir.display())));
        }

        let manifest: KbManifest = read_json(&manifest_path, "manifest")?;
        let vectors: Vec<Vec<f32>> = read_json(&vectors_path, "vectors")?;

        if manifest.template_version != TEXT_TEMPLATE_VERSION {
            return Err(AppError::new(
                "KB_TEMPLATE_MISMATCH",
                "Knowledge base was built with a different embedding-text template",
            )
            .with_details(format!(
                "stored={}; expected={}",
                manifest.template_version, TEXT_TEMPLATE_VERSION
            )));
        }

        let n = manifest.record_count as usize;
        if manifest.texts.len() != n || manifest.metas.len() != n || vectors.len() != n {
            return Err(AppError::new(
                "KB_INVALID",
                "Knowledge base artifacts are not index-aligned",
            )
            .with_details(format!(
                "record_count={n}; texts={}; metas={}; vectors={}",
                manifest.texts.len(),
                manifest.metas.len(),
                vectors.len()
            )));
        }

        let index = FlatIpIndex::from_vectors(manifest.dimension as usize, vectors)?;
        Ok(KnowledgeBase {
            index,
            texts: manifest.texts,
            metas: manifest.metas,
        })
    }

    fn write_json_atomic<T: Serialize>(
        &self,
        path: &Path,
        value: &T,
        what: &str,
    ) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(value).map_err(|e| {
            AppError::new("KB_PERSIST_FAILED", format!("Failed to encode {what}"))
                .with_details(e.to_string())
        })?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json.as_bytes()).map_err(|e| {
            AppError::new("KB_PERSIST_FAILED", format!("Failed to write {what}"))
                .with_details(format!("path={}; err={}", tmp.display(), e))
        })?;
        fs::rename(&tmp, path).map_err(|e| {
            AppError::new("KB_PERSIST_FAILED", format!("Failed to finalize {what} write"))
                .with_details(format!("tmp={}; dest={}; err={}", tmp.display(), path.display(), e))
        })?;
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::new("KB_NOT_FOUND", format!("Failed to read knowledge base {what}"))
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::new("KB_INVALID", format!("Failed to decode knowledge base {what}"))
            .with_details(format!("path={}; err={}", path.display(), e))
    })
}

/// Ordered multi-path fallback: try each store, first successful load wins.
/// Exhausting every candidate is the hard "no knowledge base available"
/// failure; individual misses stay recoverable.
pub fn load_first(stores: &[KbStore]) -> Result<(KnowledgeBase, PathBuf), AppError> {
    let mut tried: Vec<String> = Vec::new();
    for store in stores {
        match store.load() {
            Ok(kb) => return Ok((kb, store.dir().to_path_buf())),
            Err(e) if e.is_code("KB_NOT_FOUND") => {
                tried.push(store.dir().display().to_string());
            }
            Err(e) => return Err(e),
        }
    }
    Err(AppError::new(
        "KB_NOT_FOUND",
        "No knowledge base available at any candidate path",
    )
    .with_details(format!("tried={}", tried.join(", "))))
}
