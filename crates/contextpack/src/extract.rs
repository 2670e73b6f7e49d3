use crate::reader::{section_delimiter, DELIMITER_FENCE};

/// Recover one file's body from a blob built by [`crate::reader::read_files`].
///
/// The body runs from the end of the path's delimiter to the next run of
/// sixteen dashes (or the end of the blob) and is returned trimmed. The
/// delimiter only counts when it fills a whole line, so the section for
/// `-a.py` never answers for `a.py`.
///
/// A body that itself contains sixteen consecutive dashes is cut at that
/// point; the blob format cannot tell such text from a delimiter.
pub fn extract_file_content<'a>(combined: &'a str, relative_path: &str) -> Option<&'a str> {
    if combined.is_empty() || relative_path.is_empty() {
        return None;
    }

    let marker = section_delimiter(relative_path);
    let start = combined
        .match_indices(marker.as_str())
        .map(|(i, _)| i)
        .find(|&i| {
            let line_start = i == 0 || combined[..i].ends_with('\n');
            let line_end = combined[i + marker.len()..].starts_with('\n');
            line_start && line_end
        })?
        + marker.len();
    let rest = &combined[start..];
    let end = rest.find(DELIMITER_FENCE).unwrap_or(rest.len());
    Some(rest[..end].trim())
}
