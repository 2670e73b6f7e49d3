mod context;
mod llm;
mod prompt;
mod scan;

pub use context::*;
pub use llm::*;
pub use prompt::*;
pub use scan::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let caps = [
            ("context.max_chars_per_file", self.context.max_chars_per_file),
            (
                "context.max_total_context_chars",
                self.context.max_total_context_chars,
            ),
            (
                "context.max_files_to_include",
                self.context.max_files_to_include,
            ),
        ];
        for (field, value) in caps {
            if value == 0 {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: field.into(),
                    message: "must be greater than 0".into(),
                });
            }
        }

        // A per-file cap above the total cap means one file can exhaust the
        // whole budget on its own.
        if self.context.max_chars_per_file > self.context.max_total_context_chars {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "context.max_chars_per_file".into(),
                message: "exceeds context.max_total_context_chars".into(),
            });
        }

        if self.prompt.response_language.trim().is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "prompt.response_language".into(),
                message: "response_language must not be empty".into(),
            });
        }

        let provider = &self.llm.provider;
        if provider.id.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.provider.id".into(),
                message: "provider id must not be empty".into(),
            });
        }
        if provider.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.provider.base_url".into(),
                message: "provider base_url must not be empty".into(),
            });
        }

        if provider.auth.key.is_none() {
            let env_set = provider
                .auth
                .env
                .as_deref()
                .map(|var| std::env::var(var).is_ok_and(|v| !v.is_empty()))
                .unwrap_or(false);
            if !env_set {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Warning,
                    field: "llm.provider.auth".into(),
                    message: "no API key available; `ask` will fail until one is set".into(),
                });
            }
        }

        errors
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
