use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM provider
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "d_300000")]
    pub timeout_ms: u64,
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    #[serde(default = "d_2000")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            timeout_ms: 300_000,
            temperature: 0.7,
            max_tokens: 2_000,
        }
    }
}

/// An OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "d_provider_id")]
    pub id: String,
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "d_model")]
    pub default_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: d_provider_id(),
            base_url: d_base_url(),
            auth: AuthConfig::default(),
            default_model: d_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header name (e.g. "Authorization", "api-key").
    #[serde(default)]
    pub header: Option<String>,
    /// Header value prefix (e.g. "Bearer ").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Env var containing the key.
    #[serde(default = "d_key_env")]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: None,
            prefix: None,
            env: d_key_env(),
            key: None,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_300000() -> u64 {
    300_000
}
fn d_temperature() -> f32 {
    0.7
}
fn d_2000() -> u32 {
    2_000
}
fn d_provider_id() -> String {
    "openai".into()
}
fn d_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn d_model() -> String {
    "gpt-3.5-turbo".into()
}
fn d_key_env() -> Option<String> {
    Some("OPENAI_API_KEY".into())
}
