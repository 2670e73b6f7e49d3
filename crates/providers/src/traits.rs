use cp_domain::error::Result;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request / Response types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A single-turn completion request: the assembled prompt goes in as one
/// user message.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Model identifier override. When `None`, the provider uses its default.
    pub model: Option<String>,
    /// Sampling temperature (0.0 – 2.0). `None` lets the provider choose.
    pub temperature: Option<f32>,
    /// Maximum tokens in the response. `None` lets the provider choose.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Reply text, trimmed. Never empty.
    pub content: String,
    /// The model that actually produced the response.
    pub model: String,
    pub usage: Option<Usage>,
    pub finish_reason: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Core provider trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A text completion backend.
///
/// The prompt is delivered as-is; implementations neither retry nor reshape
/// it.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and wait for the full reply.
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse>;

    /// A unique identifier for this provider instance.
    fn provider_id(&self) -> &str;
}
