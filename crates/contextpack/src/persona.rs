/// Persona hints keyed by extension, checked in filter order.
const PERSONAS: &[(&str, &str)] = &[
    (
        ".py",
        "Imagine you are a senior Python developer with 10+ years of experience.",
    ),
    (
        ".cs",
        "Imagine you are a senior C#/.NET developer with 10+ years of experience.",
    ),
    (
        ".ts",
        "Imagine you are a senior TypeScript developer with 10+ years of experience.",
    ),
    (
        ".js",
        "Imagine you are a senior JavaScript developer with 10+ years of experience.",
    ),
    (
        ".rs",
        "Imagine you are a senior Rust developer with 10+ years of experience.",
    ),
];

pub const DEFAULT_PERSONA: &str =
    "Imagine you are a senior software engineer with 10+ years of experience.";

/// Pick the persona for a file-type filter such as `".py"` or `"*.cs,.json"`.
///
/// The first token with a known persona wins.
pub fn persona_for_filter(filter: &str) -> &'static str {
    filter
        .split(',')
        .map(|t| t.trim().trim_start_matches('*').to_lowercase())
        .find_map(|token| {
            PERSONAS
                .iter()
                .find(|(ext, _)| *ext == token)
                .map(|(_, persona)| *persona)
        })
        .unwrap_or(DEFAULT_PERSONA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_filter_gets_python_persona() {
        assert!(persona_for_filter(".py").contains("Python"));
        assert!(persona_for_filter("*.PY").contains("Python"));
    }

    #[test]
    fn first_known_token_wins() {
        assert!(persona_for_filter(".md, .cs, .py").contains("C#"));
    }

    #[test]
    fn unknown_filter_falls_back() {
        assert_eq!(persona_for_filter(".md,.txt"), DEFAULT_PERSONA);
        assert_eq!(persona_for_filter(""), DEFAULT_PERSONA);
    }
}
