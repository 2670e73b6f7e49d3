use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Files grouped by their directory relative to the scan root.
///
/// The empty key is the root itself. Rebuilt for every request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructureSummary {
    pub directories: BTreeMap<String, Vec<String>>,
    pub total_files: usize,
}

impl StructureSummary {
    pub fn from_paths(paths: &[PathBuf], root: &Path) -> Self {
        let mut directories: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for path in paths {
            let relative = path.strip_prefix(root).unwrap_or(path);
            let dir = relative
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            let Some(name) = relative.file_name() else {
                continue;
            };
            directories
                .entry(dir)
                .or_default()
                .push(name.to_string_lossy().into_owned());
        }

        for files in directories.values_mut() {
            files.sort();
        }

        Self {
            directories,
            total_files: paths.len(),
        }
    }

    pub fn total_directories(&self) -> usize {
        self.directories.len()
    }

    /// Human-readable tree listing with a count footer.
    pub fn render(&self, excluded_dirs: &[String]) -> String {
        let mut out = String::new();
        out.push_str("PROJECT STRUCTURE (FILTERED)\n");
        out.push_str("============================\n");

        for (dir, files) in &self.directories {
            if dir.is_empty() {
                out.push_str("[ROOT]\n");
            } else {
                let _ = writeln!(out, "[{dir}/]");
            }
            for file in files {
                let _ = writeln!(out, "   {file}");
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "Summary: {} files in {} directories",
            self.total_files,
            self.total_directories()
        );
        let excluded = excluded_dirs
            .iter()
            .map(|d| format!("{d}/"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "Excluded: {excluded} folders");
        out
    }
}
