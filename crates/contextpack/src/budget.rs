use cp_domain::config::ContextConfig;

/// Hard caps applied while selecting file bodies.
///
/// Fixed for the lifetime of a [`ContextPackBuilder`](crate::ContextPackBuilder);
/// tests build their own instead of touching global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBudget {
    pub max_chars_per_file: usize,
    pub max_total_context_chars: usize,
    pub max_files_to_include: usize,
}

impl PromptBudget {
    pub fn new(
        max_chars_per_file: usize,
        max_total_context_chars: usize,
        max_files_to_include: usize,
    ) -> Self {
        Self {
            max_chars_per_file,
            max_total_context_chars,
            max_files_to_include,
        }
    }

    /// Length above which the composed prompt is cut.
    pub fn prompt_hard_limit(&self) -> usize {
        self.max_total_context_chars.saturating_mul(2)
    }

    /// Cap for the logs section: never more than half the total budget.
    pub fn log_cap(&self, log_max_chars: usize) -> usize {
        log_max_chars.min(self.max_total_context_chars / 2)
    }
}

impl Default for PromptBudget {
    fn default() -> Self {
        Self::from(&ContextConfig::default())
    }
}

impl From<&ContextConfig> for PromptBudget {
    fn from(cfg: &ContextConfig) -> Self {
        Self::new(
            cfg.max_chars_per_file,
            cfg.max_total_context_chars,
            cfg.max_files_to_include,
        )
    }
}
