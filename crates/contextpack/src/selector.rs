//! Priority ordering and budgeted selection of file bodies.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::budget::PromptBudget;
use crate::extract::extract_file_content;
use crate::truncation::{char_len, sanitize, truncate_per_file};

/// Inclusion rank by extension; lower ranks are included first.
const EXTENSION_PRIORITY: &[(&str, u8)] = &[
    (".cs", 1),
    (".py", 1),
    (".js", 2),
    (".ts", 2),
    (".json", 2),
    (".xml", 3),
    (".config", 3),
    (".md", 4),
    (".txt", 5),
    (".log", 6),
];

/// Rank for every extension not listed above.
pub const DEFAULT_PRIORITY: u8 = 10;

pub fn priority_for_path(path: &str) -> u8 {
    let Some(ext) = Path::new(path).extension() else {
        return DEFAULT_PRIORITY;
    };
    let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
    EXTENSION_PRIORITY
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, rank)| *rank)
        .unwrap_or(DEFAULT_PRIORITY)
}

/// Deduplicate and order paths by (priority, path length).
///
/// The sort is stable, so equal keys keep their input order.
pub fn order_paths(paths: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut ordered: Vec<&str> = paths
        .iter()
        .map(String::as_str)
        .filter(|p| seen.insert(*p))
        .collect();
    ordered.sort_by_key(|p| (priority_for_path(p), char_len(p)));
    ordered
}

/// A file body chosen for the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedFile {
    pub path: String,
    pub priority: u8,
    /// Characters in the extracted body before truncation.
    pub raw_chars: usize,
    pub truncated: bool,
    #[serde(skip)]
    pub content: String,
}

impl SelectedFile {
    pub fn chars(&self) -> usize {
        char_len(&self.content)
    }
}

/// Why selection ended before the candidate list was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    FileCap,
    TotalCap,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    pub files: Vec<SelectedFile>,
    pub included_chars: usize,
    /// Candidates with no section in the blob; skipped without failing.
    pub missing: Vec<String>,
    pub stopped: Option<StopReason>,
}

/// Greedily select file bodies in priority order under `budget`.
///
/// Each body is truncated to `max_chars_per_file` and sanitized. Selection
/// stops at the first file that would exceed the file-count cap or push the
/// included total above `max_total_context_chars`; later candidates are not
/// considered.
pub fn select_files(processed: &[String], combined: &str, budget: &PromptBudget) -> Selection {
    let mut selection = Selection::default();

    for path in order_paths(processed) {
        if selection.files.len() >= budget.max_files_to_include {
            selection.stopped = Some(StopReason::FileCap);
            break;
        }

        let Some(raw) = extract_file_content(combined, path) else {
            tracing::debug!(path, "no section in combined content, skipping");
            selection.missing.push(path.to_string());
            continue;
        };

        let (trimmed, truncated) = truncate_per_file(raw, budget.max_chars_per_file);
        let content = sanitize(&trimmed).into_owned();
        let chars = char_len(&content);

        if selection.included_chars + chars > budget.max_total_context_chars {
            selection.stopped = Some(StopReason::TotalCap);
            break;
        }

        selection.included_chars += chars;
        selection.files.push(SelectedFile {
            path: path.to_string(),
            priority: priority_for_path(path),
            raw_chars: char_len(raw),
            truncated,
            content,
        });
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::section_delimiter;

    fn blob(files: &[(&str, &str)]) -> String {
        files
            .iter()
            .map(|(path, body)| format!("{}\n{body}\n\n", section_delimiter(path)))
            .collect()
    }

    fn paths(files: &[(&str, &str)]) -> Vec<String> {
        files.iter().map(|(p, _)| p.to_string()).collect()
    }

    fn selected_paths(selection: &Selection) -> Vec<&str> {
        selection.files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn priority_table() {
        assert_eq!(priority_for_path("Program.CS"), 1);
        assert_eq!(priority_for_path("app/main.py"), 1);
        assert_eq!(priority_for_path("package.json"), 2);
        assert_eq!(priority_for_path("web.config"), 3);
        assert_eq!(priority_for_path("README.md"), 4);
        assert_eq!(priority_for_path("notes.txt"), 5);
        assert_eq!(priority_for_path("run.log"), 6);
        assert_eq!(priority_for_path("main.rs"), DEFAULT_PRIORITY);
        assert_eq!(priority_for_path("Makefile"), DEFAULT_PRIORITY);
    }

    #[test]
    fn orders_by_priority_then_length_and_dedups() {
        let input: Vec<String> = ["docs/README.md", "src/deep/mod.py", "a.py", "x.json", "a.py"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            order_paths(&input),
            vec!["a.py", "src/deep/mod.py", "x.json", "docs/README.md"]
        );
    }

    #[test]
    fn ordering_is_deterministic() {
        let input: Vec<String> = ["b.py", "a.py", "c.md", "d.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(order_paths(&input), order_paths(&input));
        // equal keys keep input order
        assert_eq!(order_paths(&input)[..2], ["b.py", "a.py"]);
    }

    #[test]
    fn respects_file_cap() {
        let files = [("a.py", "1"), ("b.py", "2"), ("c.py", "3")];
        let budget = PromptBudget::new(100, 1_000, 2);

        let selection = select_files(&paths(&files), &blob(&files), &budget);
        assert_eq!(selection.files.len(), 2);
        assert_eq!(selection.stopped, Some(StopReason::FileCap));
    }

    #[test]
    fn stops_at_total_cap_without_skipping_ahead() {
        let big = "x".repeat(80);
        let files = [("a.py", "y".repeat(30)), ("b.py", big), ("c.md", "z".repeat(5))];
        let files: Vec<(&str, &str)> = files.iter().map(|(p, b)| (*p, b.as_str())).collect();
        let budget = PromptBudget::new(1_000, 100, 10);

        let selection = select_files(&paths(&files), &blob(&files), &budget);
        // c.md would fit but selection short-circuits at b.py
        assert_eq!(selected_paths(&selection), vec!["a.py"]);
        assert_eq!(selection.included_chars, 30);
        assert_eq!(selection.stopped, Some(StopReason::TotalCap));
    }

    #[test]
    fn included_chars_never_exceed_total_cap() {
        let files: Vec<(String, String)> = (0..20)
            .map(|i| (format!("f{i}.py"), "q".repeat(37 + i)))
            .collect();
        let files: Vec<(&str, &str)> = files.iter().map(|(p, b)| (p.as_str(), b.as_str())).collect();
        let budget = PromptBudget::new(40, 300, 50);

        let selection = select_files(&paths(&files), &blob(&files), &budget);
        let sum: usize = selection.files.iter().map(SelectedFile::chars).sum();
        assert_eq!(sum, selection.included_chars);
        assert!(sum <= budget.max_total_context_chars);
        assert!(selection.files.len() <= budget.max_files_to_include);
    }

    #[test]
    fn missing_sections_are_skipped_and_counted() {
        let files = [("a.py", "a"), ("b.md", "b")];
        let mut processed = paths(&files);
        processed.insert(0, "ghost.py".into());

        let selection = select_files(&processed, &blob(&files), &PromptBudget::default());
        assert_eq!(selected_paths(&selection), vec!["a.py", "b.md"]);
        assert_eq!(selection.missing, vec!["ghost.py".to_string()]);
        assert_eq!(selection.stopped, None);
    }

    #[test]
    fn oversized_body_is_mid_truncated_and_sanitized() {
        let body = format!("{}\0{}", "h".repeat(5_000), "t".repeat(3_999));
        let files = [("big.py", body.as_str())];
        let budget = PromptBudget::new(4_000, 35_000, 80);

        let selection = select_files(&paths(&files), &blob(&files), &budget);
        let file = &selection.files[0];
        assert!(file.truncated);
        assert_eq!(file.raw_chars, 9_000);
        assert!(!file.content.contains('\0'));
        assert_eq!(file.content.matches("...[TRUNCATED]...").count(), 1);
        assert!(file.content.starts_with("hhh"));
        assert!(file.content.ends_with("ttt"));
    }
}
