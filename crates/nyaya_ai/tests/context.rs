use nyaya_ai::context::{assemble_context, ContextOptions, RetrievalContext};
use nyaya_ai::retrieve::SearchResult;
use nyaya_core::corpus::RecordMeta;
use pretty_assertions::assert_eq;

fn statute_result(section: &str, score: f32) -> SearchResult {
    SearchResult {
        record_index: 0,
        content: format!("IPC Section {section} | Title: t | Description: d | Chapter 1: c"),
        meta: RecordMeta::Statute {
            source: "Indian Penal Code".to_string(),
            section: section.to_string(),
            section_title: "Punishment for murder".to_string(),
            description: "Whoever commits murder shall be punished with death or imprisonment for life.".to_string(),
            chapter: "16".to_string(),
            chapter_title: "Of Offences Affecting the Human Body".to_string(),
        },
        score,
    }
}

fn document_result(source: &str, content: String, score: f32) -> SearchResult {
    SearchResult {
        record_index: 0,
        content,
        meta: RecordMeta::DocumentChunk {
            source: source.to_string(),
            doc_index: 0,
            chunk_index: 0,
            doc_type: ".txt".to_string(),
        },
        score,
    }
}

fn opts(threshold: f32) -> ContextOptions {
    ContextOptions {
        score_threshold: threshold,
        max_snippet_chars: 800,
    }
}

#[test]
fn filter_is_strict_and_monotone_in_the_threshold() {
    let results = vec![
        statute_result("302", 0.9),
        statute_result("420", 0.5),
        statute_result("511", 0.2),
    ];

    assert_eq!(assemble_context(&results, &opts(0.1)).record_count(), 3);
    // Strict comparison: a score equal to the threshold does not survive.
    assert_eq!(assemble_context(&results, &opts(0.2)).record_count(), 2);
    assert_eq!(assemble_context(&results, &opts(0.5)).record_count(), 1);
    assert!(assemble_context(&results, &opts(0.95)).is_empty());

    // Raising the threshold never increases the survivor count.
    let mut last = usize::MAX;
    for t in [0.0, 0.1, 0.2, 0.5, 0.9, 0.95] {
        let count = assemble_context(&results, &opts(t)).record_count();
        assert!(count <= last);
        last = count;
    }
}

#[test]
fn blocks_keep_the_input_ordering() {
    let results = vec![
        document_result("first.txt", "x".repeat(200), 0.9),
        document_result("second.txt", "y".repeat(200), 0.5),
    ];
    let ctx = assemble_context(&results, &opts(0.1));
    assert_eq!(ctx.record_count(), 2);
    let first_pos = ctx.text().find("first.txt").expect("first block");
    let second_pos = ctx.text().find("second.txt").expect("second block");
    assert!(first_pos < second_pos);
}

#[test]
fn statute_blocks_come_from_structured_metadata() {
    let ctx = assemble_context(&[statute_result("302", 0.9)], &opts(0.1));
    let text = ctx.text();
    assert!(text.contains("IPC Section 302: Punishment for murder"));
    assert!(text.contains("Chapter 16: Of Offences Affecting the Human Body"));
    assert!(text.contains("Description: Whoever commits murder"));
    // The raw embedding text (pipe template) is not what gets displayed.
    assert!(!text.contains(" | Title: "));
}

#[test]
fn statute_block_omits_the_chapter_line_when_absent() {
    let mut result = statute_result("511", 0.9);
    if let RecordMeta::Statute { chapter, chapter_title, .. } = &mut result.meta {
        chapter.clear();
        chapter_title.clear();
    }
    let ctx = assemble_context(&[result], &opts(0.1));
    assert!(!ctx.text().contains("Chapter"));
}

#[test]
fn document_blocks_are_truncated_on_char_boundaries_with_a_marker() {
    // Multibyte content exercises the char-boundary path.
    let long = "§".repeat(900);
    let ctx = assemble_context(&[document_result("scheme.txt", long, 0.9)], &opts(0.1));
    let text = ctx.text();
    assert!(text.contains("scheme.txt: "));
    assert!(text.contains("..."));
    let snippet: String = text
        .lines()
        .find(|l| l.starts_with("scheme.txt: "))
        .expect("snippet line")
        .chars()
        .skip("scheme.txt: ".chars().count())
        .collect();
    assert_eq!(snippet.chars().count(), 803); // 800 kept + "..."
}

#[test]
fn short_documents_are_not_truncated() {
    let ctx = assemble_context(
        &[document_result("scheme.txt", "short content".to_string(), 0.9)],
        &opts(0.1),
    );
    assert!(ctx.text().contains("scheme.txt: short content"));
    assert!(!ctx.text().contains("short content..."));
}

#[test]
fn empty_survivor_set_yields_the_sentinel_context() {
    let ctx = assemble_context(&[], &opts(0.1));
    assert!(ctx.is_empty());
    assert_eq!(ctx.record_count(), 0);
    assert_eq!(ctx.text(), "");
    assert_eq!(ctx, RetrievalContext::empty());
}
