//! Tests for loading advisor configuration from disk.

use std::io::Write;
use std::time::Duration;
use zen_gomoku::{AdvisorConfig, LlmProvider};

#[test]
fn test_from_file_reads_all_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
enabled = true
llm_provider = "anthropic"
llm_model = "claude-3-5-haiku-20241022"
llm_max_tokens = 128
timeout_secs = 5
"#
    )
    .unwrap();

    let config = AdvisorConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
    assert_eq!(config.model_name(), "claude-3-5-haiku-20241022");
    assert_eq!(*config.llm_max_tokens(), 128);
    assert_eq!(config.timeout(), Duration::from_secs(5));
}

#[test]
fn test_partial_file_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"llm_provider = "openai""#).unwrap();

    let config = AdvisorConfig::from_file(file.path()).unwrap();
    assert!(*config.enabled());
    assert_eq!(config.model_name(), LlmProvider::OpenAI.default_model());
    assert_eq!(*config.timeout_secs(), 30);
}

#[test]
fn test_malformed_file_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"llm_provider = "carrier pigeon""#).unwrap();

    let err = AdvisorConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AdvisorConfig::load_or_default(dir.path().join("advisor.toml")).unwrap();
    assert_eq!(config, AdvisorConfig::default());
}

#[test]
fn test_overrides_apply() {
    let config = AdvisorConfig::default()
        .override_provider(LlmProvider::OpenAI)
        .disabled();
    assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
    assert!(!*config.enabled());
}

#[test]
fn test_key_lookup_per_provider() {
    let lookup = |name: &str| Some(format!("key-for-{name}"));

    let anthropic = AdvisorConfig::with_provider(LlmProvider::Anthropic)
        .create_llm_config_with(lookup)
        .unwrap();
    assert_eq!(anthropic.api_key(), "key-for-ANTHROPIC_API_KEY");
    assert_eq!(anthropic.provider(), LlmProvider::Anthropic);

    let gemini = AdvisorConfig::default()
        .create_llm_config_with(lookup)
        .unwrap();
    assert_eq!(gemini.api_key(), "key-for-GEMINI_API_KEY");
}
