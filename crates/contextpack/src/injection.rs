//! Text of the fixed prompt sections.

use cp_domain::project::Project;

/// Reply the model gives to requests unrelated to the project.
pub const OUT_OF_SCOPE_REPLY: &str =
    "This is outside the context of the current project. I can't help with that.";

pub const NO_FILES_NOTICE: &str = "(No files available for inclusion.)";

pub const EXTRACTION_FAILED_NOTICE: &str = "(Could not extract file contents from the combined \
     content. If file contents are missing, pass the full file text separately.)";

/// Shown when the character budget ran out before any file body fit.
pub fn format_budget_exhausted(max_total_chars: usize) -> String {
    format!(
        "(No file fit within the {max_total_chars}-character context budget. \
         Ask for the specific files or fragments you need.)"
    )
}

/// Format a section header line.
pub fn format_header(title: &str) -> String {
    format!("=== {title} ===\n")
}

/// Persona plus tone and language rules.
pub fn format_persona(persona: &str, language: &str) -> String {
    format!(
        "\
=== SYSTEM / PERSONA ===
{persona}

Tone and language rules:
- Respond strictly in {language}.
- Act as a practical engineer: give precise, reproducible steps.
- Always name the files and the exact edits (which file, which lines or fragments to replace or add).
- If the request is NOT related to the current project or its code, reply briefly and strictly: \"{OUT_OF_SCOPE_REPLY}\"

",
        persona = persona.trim(),
    )
}

pub fn format_metadata(project: &Project) -> String {
    let name = if project.name.trim().is_empty() {
        "(no name)"
    } else {
        project.name.as_str()
    };
    let file_type = if project.file_type.trim().is_empty() {
        "(not specified)"
    } else {
        project.file_type.as_str()
    };

    let mut out = format!(
        "\
=== PROJECT METADATA ===
Project name: {name}
Project id: {id}
Directory path: {dir}
File types filter: {file_type}
",
        id = project.id,
        dir = project.directory_path.display(),
    );
    if let Some(desc) = project.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!("Description: {}\n", desc.trim()));
    }
    out.push('\n');
    out
}

pub fn format_structure(structure: &str) -> String {
    let body = if structure.trim().is_empty() {
        "(no structure)"
    } else {
        structure.trim_end()
    };
    format!("=== PROJECT STRUCTURE ===\n{body}\n\n")
}

pub fn format_policy(
    files_found: usize,
    files_read: usize,
    max_files: usize,
    max_chars_per_file: usize,
    max_total_chars: usize,
) -> String {
    format!(
        "\
=== FILES & CONTENT (policy) ===
Files found: {files_found}, read successfully: {files_read}.
Including at most {max_files} files, up to {max_chars_per_file} characters each, with an overall limit of {max_total_chars} characters of file context.

"
    )
}

/// One selected file body, prefixed by its path marker.
pub fn format_file(path: &str, content: &str) -> String {
    format!("--- FILE: {path} ---\n{content}\n\n")
}

pub fn format_logs(logs: &str) -> String {
    format!("=== RELEVANT LOGS ===\n{logs}\n\n")
}

pub fn format_user_request(message: &str) -> String {
    format!("=== USER REQUEST ===\n{}\n\n", message.trim())
}

pub fn format_output_instructions(language: &str) -> String {
    format!(
        "\
=== TASK / OUTPUT FORMAT ===
1) If the request concerns the project or its code, give detailed instructions for making the change. Always state:
   - which files to change (relative path),
   - the exact changes (a diff or the code to insert),
   - steps to test the change and the command to run,
   - exact commands if configuration or dependencies must be updated.

2) If the request is NOT about the project or its code (general questions, philosophy, essays), reply briefly: \"{OUT_OF_SCOPE_REPLY}\"

3) Language: {language} (all answers ONLY in {language}).

4) Answer format: first a short conclusion (2-3 sentences), then a detailed step-by-step plan with code or patches.

=== NOTE ===
If required information is missing (files or logs not included), say so briefly and ask for the needed files or logs.

"
    )
}
