use serde::{Deserialize, Serialize};

/// Per-file report within a context build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub priority: u8,
    pub raw_chars: usize,
    pub injected_chars: usize,
    pub truncated_per_file: bool,
}

/// Full report of a context build, printed by `codeprompt assemble --json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextReport {
    pub files_found: usize,
    pub files_read: usize,
    pub files_failed: usize,
    pub files: Vec<FileReport>,
    /// Read files that could not be located in the combined content.
    pub files_missing: Vec<String>,
    /// `"file_cap"` or `"total_cap"` when selection stopped early.
    pub stopped_by: Option<String>,
    pub included_chars: usize,
    pub logs_chars: usize,
    pub prompt_chars: usize,
    pub prompt_truncated: bool,
}

impl ContextReport {
    pub fn files_included(&self) -> usize {
        self.files.len()
    }

    pub fn files_truncated(&self) -> usize {
        self.files.iter().filter(|f| f.truncated_per_file).count()
    }
}
