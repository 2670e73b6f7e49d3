use cp_domain::config::{Config, DEFAULT_EXCLUDED_DIRS};

#[test]
fn default_budget_caps() {
    let config = Config::default();
    assert_eq!(config.context.max_chars_per_file, 4_000);
    assert_eq!(config.context.max_total_context_chars, 35_000);
    assert_eq!(config.context.max_files_to_include, 80);
    assert_eq!(config.context.log_max_chars, 8_000);
}

#[test]
fn default_excluded_dirs() {
    let config = Config::default();
    assert_eq!(config.scan.excluded_dirs.len(), DEFAULT_EXCLUDED_DIRS.len());
    assert!(config.scan.excluded_dirs.contains(&"node_modules".to_string()));
    assert!(config.scan.excluded_dirs.contains(&".git".to_string()));
}

#[test]
fn partial_context_section_keeps_other_defaults() {
    let toml_str = r#"
[context]
max_files_to_include = 10
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.context.max_files_to_include, 10);
    assert_eq!(config.context.max_chars_per_file, 4_000);
    assert_eq!(config.prompt.response_language, "English");
}

#[test]
fn provider_section_parses() {
    let toml_str = r#"
[llm]
temperature = 0.2

[llm.provider]
id = "local"
base_url = "http://localhost:11434/v1"
default_model = "llama3"

[llm.provider.auth]
key = "sk-local"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.llm.provider.id, "local");
    assert_eq!(config.llm.provider.default_model, "llama3");
    assert_eq!(config.llm.provider.auth.key.as_deref(), Some("sk-local"));
    // env keeps its default when only `key` is given
    assert_eq!(config.llm.provider.auth.env.as_deref(), Some("OPENAI_API_KEY"));
    assert!((config.llm.temperature - 0.2).abs() < 1e-6);
    assert_eq!(config.llm.max_tokens, 2_000);
}

#[test]
fn custom_excluded_dirs_replace_defaults() {
    let toml_str = r#"
[scan]
excluded_dirs = ["target"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.scan.excluded_dirs, vec!["target".to_string()]);
}
