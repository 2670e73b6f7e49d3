//! Recursive file discovery with extension filters and excluded folders.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use cp_domain::error::{Error, Result};
use cp_domain::trace::TraceEvent;

/// Split a file-type filter into name patterns.
///
/// `".py"` → `["*.py"]`, `".py, *.md"` → `["*.py", "*.md"]`. Blank tokens
/// are dropped; a filter with no usable token matches every file.
pub fn filter_patterns(filter: &str) -> Vec<String> {
    let mut patterns: Vec<String> = filter
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.starts_with('*') {
                t.to_string()
            } else {
                format!("*{t}")
            }
        })
        .collect();
    if patterns.is_empty() {
        patterns.push("*".into());
    }
    patterns
}

/// True when any directory segment of `relative_path` is an excluded name.
///
/// Both `/` and `\` count as separators; the final segment (the file name)
/// is not checked.
pub fn is_in_excluded_dir(relative_path: &str, excluded: &[String]) -> bool {
    let segments: Vec<&str> = relative_path.split(['/', '\\']).collect();
    let Some((_file_name, dirs)) = segments.split_last() else {
        return false;
    };
    dirs.iter()
        .any(|seg| excluded.iter().any(|name| name.as_str() == *seg))
}

/// Walk `root` and return every file matching `filter`, outside excluded
/// folders, deduplicated and sorted.
///
/// A missing root yields an empty list. Failing to list the root itself is
/// the only error; unreadable subdirectories are skipped with a warning.
pub fn discover_files(root: &Path, filter: &str, excluded: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "scan root missing, nothing to discover");
        return Ok(Vec::new());
    }

    let patterns: Vec<Pattern> = filter_patterns(filter)
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "ignoring invalid file-type pattern");
                None
            }
        })
        .collect();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !(e.depth() > 0 && e.file_type().is_dir() && is_excluded_name(e, excluded)));

    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 || e.path() == Some(root) => {
                return Err(Error::Scan {
                    root: root.display().to_string(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        // Symlinked files count; symlinked directories are not followed.
        let file_type = entry.file_type();
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !patterns.iter().any(|p| p.matches(&name)) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if is_in_excluded_dir(&relative.to_string_lossy(), excluded) {
            continue;
        }

        found.insert(entry.into_path());
    }

    TraceEvent::FilesDiscovered {
        root: root.display().to_string(),
        filter: filter.to_string(),
        files: found.len(),
    }
    .emit();

    Ok(found.into_iter().collect())
}

fn is_excluded_name(entry: &DirEntry, excluded: &[String]) -> bool {
    let name = entry.file_name();
    excluded.iter().any(|ex| name == ex.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_domain::config::DEFAULT_EXCLUDED_DIRS;
    use std::fs;

    fn excluded() -> Vec<String> {
        DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn filter_patterns_handles_lists_and_wildcards() {
        assert_eq!(filter_patterns(".py"), vec!["*.py"]);
        assert_eq!(filter_patterns("*.py"), vec!["*.py"]);
        assert_eq!(filter_patterns(".py, .md ,"), vec!["*.py", "*.md"]);
        assert_eq!(filter_patterns(""), vec!["*"]);
    }

    #[test]
    fn excluded_segments_match_both_separators() {
        let ex = excluded();
        assert!(is_in_excluded_dir("venv/lib/site.py", &ex));
        assert!(is_in_excluded_dir("src\\node_modules\\x.js", &ex));
        assert!(is_in_excluded_dir("a/.git/config", &ex));
        assert!(!is_in_excluded_dir("src/binary.py", &ex));
        assert!(!is_in_excluded_dir("bin", &ex));
        assert!(!is_in_excluded_dir("venv.py", &ex));
    }

    #[test]
    fn missing_root_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = discover_files(&dir.path().join("nope"), ".py", &excluded()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn excluded_folders_never_appear() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "main.py");
        touch(root, "pkg/util.py");
        touch(root, "venv/lib/site.py");
        touch(root, "pkg/__pycache__/util.py");
        touch(root, "node_modules/x/index.py");
        touch(root, "obj/gen.py");

        let files = discover_files(root, ".py", &excluded()).unwrap();
        assert_eq!(relative(root, &files), vec!["main.py", "pkg/util.py"]);
    }

    #[test]
    fn overlapping_tokens_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.py");
        touch(root, "b.md");
        touch(root, "c.txt");

        let files = discover_files(root, ".py,*.py,.md", &excluded()).unwrap();
        assert_eq!(relative(root, &files), vec!["a.py", "b.md"]);
    }

    #[test]
    fn extension_must_be_a_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.py");
        touch(root, "a.pyc");
        touch(root, "notes.py.bak");

        let files = discover_files(root, ".py", &excluded()).unwrap();
        assert_eq!(relative(root, &files), vec!["a.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn unlistable_root_is_a_scan_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("locked");
        touch(&root, "a.py");
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores permission bits
        if fs::read_dir(&root).is_ok() {
            fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = discover_files(&root, ".py", &excluded());
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(Error::Scan { root: shown, .. }) => assert!(shown.ends_with("locked")),
            other => panic!("expected scan error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "main.py");
        touch(root, "secret/hidden.py");
        let secret = root.join("secret");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

        let files = discover_files(root, ".py", &excluded());
        let readable_anyway = fs::read_dir(&secret).is_ok();
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o755)).unwrap();

        let files = files.unwrap();
        if !readable_anyway {
            assert_eq!(relative(root, &files), vec!["main.py"]);
        }
    }

    #[test]
    fn file_named_like_excluded_dir_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "bin");
        touch(root, "src/obj");

        let files = discover_files(root, "", &excluded()).unwrap();
        assert_eq!(relative(root, &files), vec!["bin", "src/obj"]);
    }
}
