use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Prompt wording
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Natural language the model must answer in.
    #[serde(default = "d_language")]
    pub response_language: String,
    /// Replaces the persona picked from the project's file-type filter.
    #[serde(default)]
    pub persona: Option<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            response_language: d_language(),
            persona: None,
        }
    }
}

fn d_language() -> String {
    "English".into()
}
