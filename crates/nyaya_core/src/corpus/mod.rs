use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Revision of the statute embedding-text template. Persisted with every
/// knowledge base so a query-side template drift is detected at load time
/// instead of silently scoring across incompatible embedding spaces.
pub const TEXT_TEMPLATE_VERSION: &str = "ipc-pipe-v1";

/// One entry of the statute corpus file (`ipc_sections.json`). Field names
/// mirror the published dataset; absent fields decode to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatuteSection {
    #[serde(rename = "Section", default)]
    pub section: String,
    #[serde(default)]
    pub section_title: String,
    #[serde(default)]
    pub section_desc: String,
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub chapter_title: String,
}

/// Output of the external document readers (PDF/TXT/DOCX extraction is out
/// of scope; this is the hand-over shape).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDocument {
    pub content: String,
    pub source: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

/// Structured metadata for one retrievable record.
///
/// The statute variant keeps the description as a field of its own: context
/// formatting reads it from here and never re-parses the embedding text,
/// which is a derived display artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordMeta {
    Statute {
        source: String,
        section: String,
        section_title: String,
        description: String,
        chapter: String,
        chapter_title: String,
    },
    DocumentChunk {
        source: String,
        doc_index: u32,
        chunk_index: u32,
        doc_type: String,
    },
}

/// One retrievable unit of corpus knowledge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub text: String,
    pub meta: RecordMeta,
}

/// Canonical embedding text for a statute section. Field order is
/// load-bearing: the same template must produce build-time and query-time
/// texts, so changes here require bumping `TEXT_TEMPLATE_VERSION`.
pub fn statute_embedding_text(s: &StatuteSection) -> String {
    format!(
        "IPC Section {} | Title: {} | Description: {} | Chapter {}: {}",
        s.section, s.section_title, s.section_desc, s.chapter, s.chapter_title
    )
}

/// One record per statute section, in corpus iteration order.
pub fn statute_records(sections: &[StatuteSection]) -> Result<Vec<Record>, AppError> {
    let mut out = Vec::with_capacity(sections.len());
    for s in sections {
        out.push(Record {
            text: statute_embedding_text(s),
            meta: RecordMeta::Statute {
                source: "Indian Penal Code".to_string(),
                section: s.section.clone(),
                section_title: s.section_title.clone(),
                description: s.section_desc.clone(),
                chapter: s.chapter.clone(),
                chapter_title: s.chapter_title.clone(),
            },
        });
    }
    if out.is_empty() {
        return Err(AppError::new(
            "CORPUS_EMPTY",
            "Statute corpus produced zero records; refusing to build an empty knowledge base",
        ));
    }
    Ok(out)
}

/// Paragraph-level chunking of loose documents. Paragraphs at or below
/// `min_chunk_chars` characters are dropped as embedding noise.
pub fn document_records(
    docs: &[RawDocument],
    min_chunk_chars: usize,
) -> Result<Vec<Record>, AppError> {
    let mut out = Vec::new();
    for (doc_index, doc) in docs.iter().enumerate() {
        let normalized = normalize_text(&doc.content);
        let source = file_name(&doc.source);
        let mut chunk_index: u32 = 0;
        for para in normalized.split("\n\n") {
            let para = para.trim();
            if para.is_empty() || para.chars().count() <= min_chunk_chars {
                continue;
            }
            out.push(Record {
                text: para.to_string(),
                meta: RecordMeta::DocumentChunk {
                    source: source.clone(),
                    doc_index: doc_index as u32,
                    chunk_index,
                    doc_type: doc.doc_type.clone(),
                },
            });
            chunk_index += 1;
        }
    }
    if out.is_empty() {
        return Err(AppError::new(
            "CORPUS_EMPTY",
            "Document corpus produced zero usable chunks; refusing to build an empty knowledge base",
        ));
    }
    Ok(out)
}

/// Decode the statute corpus file.
pub fn parse_statute_json(json: &str) -> Result<Vec<StatuteSection>, AppError> {
    serde_json::from_str(json).map_err(|e| {
        AppError::new("CORPUS_PARSE_FAILED", "Failed to decode statute corpus JSON")
            .with_details(e.to_string())
    })
}

pub(crate) fn normalize_text(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

fn file_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source)
        .to_string()
}
