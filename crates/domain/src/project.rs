use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The project a prompt is assembled for.
///
/// Records are owned by whatever stores saved projects; this crate only
/// reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub directory_path: PathBuf,
    /// A single extension (`.py`) or a comma-separated list (`.py,.md`).
    #[serde(default = "d_file_type")]
    pub file_type: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Log file attached when the caller passes no logs.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl Project {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        directory_path: impl Into<PathBuf>,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            directory_path: directory_path.into(),
            file_type: file_type.into(),
            description: None,
            log_path: None,
        }
    }
}

fn d_file_type() -> String {
    ".py".into()
}
