use std::env;
use std::path::PathBuf;

use nyaya_core::config::AiConfig;
use pretty_assertions::assert_eq;

#[test]
fn defaults_match_the_deployed_assistant() {
    let cfg = AiConfig::default();
    assert_eq!(cfg.groq_model, "llama-3.1-8b-instant");
    assert_eq!(cfg.embed_base_url, "http://127.0.0.1:11434");
    assert_eq!(cfg.embed_model, "all-minilm");
    assert_eq!(cfg.kb_paths[0], PathBuf::from("knowledge_base/ipc_complete"));
    assert_eq!(cfg.top_k, 5);
    assert_eq!(cfg.statute_score_threshold, 0.1);
    assert_eq!(cfg.document_score_threshold, 0.2);
    assert_eq!(cfg.temperature, 0.1);
    assert_eq!(cfg.max_tokens, 1024);
    assert_eq!(cfg.max_snippet_chars, 800);
    assert_eq!(cfg.min_chunk_chars, 100);
}

#[test]
fn env_overlay_prepends_the_kb_path_and_swaps_models() {
    env::set_var("GROQ_MODEL", "llama-3.1-70b-versatile");
    env::set_var("NYAYA_KB_PATH", "/tmp/kb_override");

    let cfg = AiConfig::from_env();
    assert_eq!(cfg.groq_model, "llama-3.1-70b-versatile");
    assert_eq!(cfg.kb_paths[0], PathBuf::from("/tmp/kb_override"));
    // Defaults stay behind the override as fallback candidates.
    assert_eq!(cfg.kb_paths[1], PathBuf::from("knowledge_base/ipc_complete"));

    env::remove_var("GROQ_MODEL");
    env::remove_var("NYAYA_KB_PATH");
}
