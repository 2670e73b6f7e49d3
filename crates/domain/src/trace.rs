use serde::Serialize;

/// Structured trace events emitted across all codeprompt crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    FilesDiscovered {
        root: String,
        filter: String,
        files: usize,
    },
    FileReadFailed {
        path: String,
        error: String,
    },
    ContextBuilt {
        files_found: usize,
        files_read: usize,
        files_included: usize,
        files_truncated: usize,
        files_missing: usize,
        included_chars: usize,
        prompt_chars: usize,
        prompt_truncated: bool,
    },
    LlmRequest {
        provider: String,
        model: String,
        prompt_chars: usize,
        duration_ms: u64,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "cp_event");
    }
}
