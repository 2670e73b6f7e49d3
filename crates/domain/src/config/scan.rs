use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Directory scan
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Folder names that are never descended into for context.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["venv", "node_modules", "bin", "obj", "__pycache__", ".git"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// A file is skipped when any segment of its path equals one of these.
    #[serde(default = "d_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: d_excluded_dirs(),
        }
    }
}

fn d_excluded_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}
