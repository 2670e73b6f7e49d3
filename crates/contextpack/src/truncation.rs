use std::borrow::Cow;

/// Inserted between the kept head and tail of a truncated text.
pub const TRUNCATION_MARKER: &str = "\n\n...[TRUNCATED]...\n\n";

/// Appended when the composed prompt is cut at its hard limit.
pub const PROMPT_OVERFLOW_MARKER: &str = "\n\n[TRUNCATED CONTEXT DUE TO SIZE LIMITS]";

/// Length in characters (Unicode scalar values), the unit of every budget.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `n`th character, or `text.len()` past the end.
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Per-file truncation.
///
/// If `content` exceeds `max_chars` characters, keep the first and the last
/// `max_chars / 2` characters with [`TRUNCATION_MARKER`] between them.
/// The result is never longer than `max_chars + TRUNCATION_MARKER.len()`.
pub fn truncate_per_file(content: &str, max_chars: usize) -> (String, bool) {
    let total = char_len(content);
    if total <= max_chars {
        return (content.to_string(), false);
    }

    let half = max_chars / 2;
    let head_end = byte_offset(content, half);
    let tail_start = byte_offset(content, total - half);

    let mut result = String::with_capacity(head_end + TRUNCATION_MARKER.len() + content.len() - tail_start);
    result.push_str(&content[..head_end]);
    result.push_str(TRUNCATION_MARKER);
    result.push_str(&content[tail_start..]);
    (result, true)
}

/// Keep at most `max_chars` leading characters.
pub fn truncate_prefix(content: &str, max_chars: usize) -> (&str, bool) {
    let end = byte_offset(content, max_chars);
    (&content[..end], end < content.len())
}

fn is_disallowed(ch: char) -> bool {
    ch.is_control() && !matches!(ch, '\t' | '\r' | '\n')
}

/// Strip NUL and every other control character except tab, CR and LF.
///
/// Non-ASCII text is kept as is. Clean input is returned borrowed.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_disallowed) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&ch| !is_disallowed(ch)).collect())
}
