use nyaya_core::corpus::RecordMeta;

use crate::retrieve::SearchResult;

const CONTEXT_RAIL: &str =
    "============================================================";

/// Tunables for context assembly. Thresholds are corpus-dependent and come
/// from configuration, not from a derived constant.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub score_threshold: f32,
    pub max_snippet_chars: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            score_threshold: 0.1,
            max_snippet_chars: 800,
        }
    }
}

/// The assembled grounding block handed to the prompt, plus how many records
/// survived filtering. `record_count == 0` is the sentinel the orchestrator
/// uses to short-circuit before any LLM call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalContext {
    text: String,
    record_count: usize,
}

impl RetrievalContext {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            record_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }
}

/// Keep results scoring strictly above the threshold and format them in
/// input order (highest score first; no re-sorting here).
pub fn assemble_context(results: &[SearchResult], opts: &ContextOptions) -> RetrievalContext {
    let blocks: Vec<String> = results
        .iter()
        .filter(|r| r.score > opts.score_threshold)
        .map(|r| format_result(r, opts.max_snippet_chars))
        .collect();

    if blocks.is_empty() {
        return RetrievalContext::empty();
    }

    let record_count = blocks.len();
    let text = format!(
        "\n\n{CONTEXT_RAIL}\n{}\n{CONTEXT_RAIL}",
        blocks.join("\n\n")
    );
    RetrievalContext { text, record_count }
}

/// Formatting reads structured metadata only; the embedding text is a
/// derived artifact and is never parsed back into fields.
fn format_result(result: &SearchResult, max_snippet_chars: usize) -> String {
    match &result.meta {
        RecordMeta::Statute {
            section,
            section_title,
            description,
            chapter,
            chapter_title,
            ..
        } => {
            let mut out = format!("IPC Section {section}: {section_title}");
            if !chapter.is_empty() && !chapter_title.is_empty() {
                out.push_str(&format!("\nChapter {chapter}: {chapter_title}"));
            }
            if !description.is_empty() {
                out.push_str(&format!(
                    "\nDescription: {}",
                    truncate_chars(description, max_snippet_chars)
                ));
            }
            out
        }
        RecordMeta::DocumentChunk { source, .. } => {
            format!("{source}: {}", truncate_chars(&result.content, max_snippet_chars))
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    let t = text.trim();
    if t.chars().count() <= max_chars {
        return t.to_string();
    }
    let mut s: String = t.chars().take(max_chars).collect();
    s.push_str("...");
    s
}
