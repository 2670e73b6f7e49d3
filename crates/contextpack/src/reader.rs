//! Reads discovered files into one delimited text blob.
//!
//! Each successfully read file becomes a section:
//!
//! ```text
//! ----------------src/main.py----------------
//! <file content>
//!
//! ```
//!
//! The blob is an internal exchange format between [`read_files`] and
//! [`crate::extract::extract_file_content`]; nothing outside this crate
//! should parse it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use cp_domain::trace::TraceEvent;

use crate::truncation::char_len;

/// Sixteen dashes on both sides of the path in a section delimiter.
pub const DELIMITER_FENCE: &str = "----------------";

/// The delimiter line (without newline) that opens the section for `path`.
pub fn section_delimiter(path: &str) -> String {
    format!("{DELIMITER_FENCE}{path}{DELIMITER_FENCE}")
}

/// Outcome of reading one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReadOutcome {
    Read { chars: usize },
    Failed { error: String },
}

/// One discovered file, enriched with its read outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub extension: String,
    pub outcome: ReadOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReadError {
    pub path: String,
    pub message: String,
}

/// Aggregate over every file handed to [`read_files`].
///
/// `success_files == processed.len()` and `combined` holds one section per
/// processed path, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileBatch {
    pub total_files: usize,
    pub success_files: usize,
    pub failed_files: usize,
    /// Relative paths of files that were read, in input order.
    pub processed: Vec<String>,
    pub errors: Vec<FileReadError>,
    pub files: Vec<SourceFile>,
    #[serde(skip)]
    pub combined: String,
}

impl FileBatch {
    pub fn is_success(&self) -> bool {
        self.success_files > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} files: {} successful, {} failed",
            self.total_files, self.success_files, self.failed_files
        )
    }

    /// One-line status suitable for showing to the end user.
    pub fn status_message(&self) -> String {
        if !self.is_success() {
            return "Failed to read any files from project".into();
        }
        let mut msg = format!(
            "Successfully loaded {} files from project",
            self.success_files
        );
        if self.failed_files > 0 {
            let _ = write!(msg, ", {} files failed to read", self.failed_files);
        }
        msg
    }
}

/// Path of `path` relative to `root`, or the path itself when it is not
/// under `root`.
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Read every path as UTF-8 text and combine the bodies.
///
/// Never fails: an unreadable file gets an inline error section keyed by
/// its original path and is recorded in `errors`.
pub fn read_files(paths: &[PathBuf], root: &Path) -> FileBatch {
    let mut batch = FileBatch {
        total_files: paths.len(),
        ..FileBatch::default()
    };

    for path in paths {
        let relative = relative_path(path, root);
        let extension = extension_of(path);

        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %relative, chars = char_len(&content), "read file");
                let _ = write!(
                    batch.combined,
                    "{}\n{content}\n\n",
                    section_delimiter(&relative)
                );
                batch.success_files += 1;
                batch.processed.push(relative.clone());
                batch.files.push(SourceFile {
                    path: path.clone(),
                    relative_path: relative,
                    extension,
                    outcome: ReadOutcome::Read {
                        chars: char_len(&content),
                    },
                });
            }
            Err(e) => {
                let original = path.display().to_string();
                let message = e.to_string();
                tracing::warn!(path = %original, error = %message, "failed to read file");
                TraceEvent::FileReadFailed {
                    path: original.clone(),
                    error: message.clone(),
                }
                .emit();

                let _ = write!(
                    batch.combined,
                    "{}\n[Error reading file: {message}]\n\n",
                    section_delimiter(&original)
                );
                batch.failed_files += 1;
                batch.errors.push(FileReadError {
                    path: original,
                    message: message.clone(),
                });
                batch.files.push(SourceFile {
                    path: path.clone(),
                    relative_path: relative,
                    extension,
                    outcome: ReadOutcome::Failed { error: message },
                });
            }
        }
    }

    batch
}
