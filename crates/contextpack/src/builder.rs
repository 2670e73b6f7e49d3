use serde::Serialize;

use cp_domain::config::PromptConfig;
use cp_domain::project::Project;
use cp_domain::trace::TraceEvent;

use crate::budget::PromptBudget;
use crate::injection;
use crate::persona::persona_for_filter;
use crate::reader::FileBatch;
use crate::report::{ContextReport, FileReport};
use crate::selector::{select_files, Selection, StopReason};
use crate::truncation::{self, char_len, PROMPT_OVERFLOW_MARKER};

/// Everything the composer needs for one request.
pub struct PromptInput<'a> {
    pub project: &'a Project,
    pub user_message: &'a str,
    pub batch: &'a FileBatch,
    /// Pre-rendered structure summary.
    pub structure: &'a str,
    /// Overrides both the configured and the filter-derived persona.
    pub persona: Option<&'a str>,
    pub logs: Option<&'a str>,
}

/// The final prompt text.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledPrompt {
    pub text: String,
    /// True when the hard length limit cut the composed text.
    pub truncated: bool,
}

/// Deterministic prompt builder.
///
/// Pure: accepts an already-read file batch and rendered structure, returns
/// the prompt plus a machine-readable report.
pub struct ContextPackBuilder {
    budget: PromptBudget,
    prompt: PromptConfig,
    log_max_chars: usize,
}

impl ContextPackBuilder {
    pub fn new(budget: PromptBudget, prompt: PromptConfig, log_max_chars: usize) -> Self {
        Self {
            budget,
            prompt,
            log_max_chars,
        }
    }

    pub fn budget(&self) -> &PromptBudget {
        &self.budget
    }

    /// Select file bodies and compose the prompt.
    pub fn build(&self, input: &PromptInput<'_>) -> (AssembledPrompt, ContextReport) {
        let selection = select_files(&input.batch.processed, &input.batch.combined, &self.budget);
        let logs = self.prepare_logs(input.logs);
        let prompt = self.compose(input, &selection, logs.as_deref());

        let report = ContextReport {
            files_found: input.batch.total_files,
            files_read: input.batch.success_files,
            files_failed: input.batch.failed_files,
            files: selection
                .files
                .iter()
                .map(|f| FileReport {
                    path: f.path.clone(),
                    priority: f.priority,
                    raw_chars: f.raw_chars,
                    injected_chars: f.chars(),
                    truncated_per_file: f.truncated,
                })
                .collect(),
            files_missing: selection.missing.clone(),
            stopped_by: selection.stopped.map(|r| match r {
                StopReason::FileCap => "file_cap".to_string(),
                StopReason::TotalCap => "total_cap".to_string(),
            }),
            included_chars: selection.included_chars,
            logs_chars: logs.as_deref().map(char_len).unwrap_or(0),
            prompt_chars: char_len(&prompt.text),
            prompt_truncated: prompt.truncated,
        };

        if !report.files_missing.is_empty() {
            tracing::warn!(
                missing = report.files_missing.len(),
                "some read files were not found in the combined content"
            );
        }

        TraceEvent::ContextBuilt {
            files_found: report.files_found,
            files_read: report.files_read,
            files_included: report.files_included(),
            files_truncated: report.files_truncated(),
            files_missing: report.files_missing.len(),
            included_chars: report.included_chars,
            prompt_chars: report.prompt_chars,
            prompt_truncated: report.prompt_truncated,
        }
        .emit();

        (prompt, report)
    }

    /// Cap and sanitize logs; blank logs are dropped.
    fn prepare_logs(&self, logs: Option<&str>) -> Option<String> {
        let logs = logs.filter(|l| !l.trim().is_empty())?;
        let (capped, _) =
            truncation::truncate_per_file(logs, self.budget.log_cap(self.log_max_chars));
        Some(truncation::sanitize(&capped).into_owned())
    }

    /// Assemble the fixed sections around an existing selection.
    pub fn compose(
        &self,
        input: &PromptInput<'_>,
        selection: &Selection,
        logs: Option<&str>,
    ) -> AssembledPrompt {
        let persona = input
            .persona
            .or(self.prompt.persona.as_deref())
            .unwrap_or_else(|| persona_for_filter(&input.project.file_type));
        let language = self.prompt.response_language.as_str();

        let mut out = String::new();
        out.push_str(&injection::format_persona(persona, language));
        out.push_str(&injection::format_metadata(input.project));
        out.push_str(&injection::format_structure(input.structure));
        out.push_str(&injection::format_policy(
            input.batch.total_files,
            input.batch.success_files,
            self.budget.max_files_to_include,
            self.budget.max_chars_per_file,
            self.budget.max_total_context_chars,
        ));

        if input.batch.processed.is_empty() {
            out.push_str(injection::NO_FILES_NOTICE);
            out.push_str("\n\n");
        } else {
            out.push_str(&injection::format_header("FILES CONTENT (truncated)"));
            for file in &selection.files {
                out.push_str(&injection::format_file(&file.path, &file.content));
            }
            if selection.files.is_empty() {
                if selection.stopped.is_some() {
                    out.push_str(&injection::format_budget_exhausted(
                        self.budget.max_total_context_chars,
                    ));
                } else {
                    out.push_str(injection::EXTRACTION_FAILED_NOTICE);
                }
                out.push('\n');
            }
            out.push('\n');
        }

        if let Some(logs) = logs {
            out.push_str(&injection::format_logs(logs));
        }

        out.push_str(&injection::format_user_request(input.user_message));
        out.push_str(&injection::format_output_instructions(language));

        self.apply_hard_limit(out)
    }

    fn apply_hard_limit(&self, text: String) -> AssembledPrompt {
        let limit = self.budget.prompt_hard_limit();
        let (kept, truncated) = truncation::truncate_prefix(&text, limit);
        if !truncated {
            return AssembledPrompt {
                text,
                truncated: false,
            };
        }
        tracing::warn!(
            chars = char_len(&text),
            limit,
            "composed prompt exceeds hard limit, truncating"
        );
        AssembledPrompt {
            text: format!("{kept}{PROMPT_OVERFLOW_MARKER}"),
            truncated: true,
        }
    }
}
