use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Context budget caps
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Character and file-count caps applied while assembling a prompt.
///
/// All lengths are counted in characters (Unicode scalar values).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Max characters taken from a single file (head + tail kept).
    #[serde(default = "d_4000")]
    pub max_chars_per_file: usize,
    /// Overall cap for file bodies; the composed prompt is hard-capped at
    /// twice this value.
    #[serde(default = "d_35000")]
    pub max_total_context_chars: usize,
    #[serde(default = "d_80")]
    pub max_files_to_include: usize,
    /// Upper bound for the logs section. The effective cap is
    /// `min(log_max_chars, max_total_context_chars / 2)`.
    #[serde(default = "d_8000")]
    pub log_max_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_chars_per_file: 4_000,
            max_total_context_chars: 35_000,
            max_files_to_include: 80,
            log_max_chars: 8_000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_4000() -> usize {
    4_000
}
fn d_35000() -> usize {
    35_000
}
fn d_80() -> usize {
    80
}
fn d_8000() -> usize {
    8_000
}
