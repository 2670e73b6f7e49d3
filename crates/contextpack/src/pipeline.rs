//! End-to-end assembly: discover, read, summarize, select, compose.

use std::path::{Path, PathBuf};

use cp_domain::config::{Config, PromptConfig, ScanConfig};
use cp_domain::error::Result;
use cp_domain::project::Project;

use crate::budget::PromptBudget;
use crate::builder::{AssembledPrompt, ContextPackBuilder, PromptInput};
use crate::discovery::discover_files;
use crate::reader::{read_files, FileBatch};
use crate::report::ContextReport;
use crate::structure::StructureSummary;

/// Files of one project, read for a single request.
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    pub root: PathBuf,
    pub paths: Vec<PathBuf>,
    pub batch: FileBatch,
    pub structure: StructureSummary,
}

/// Discover and read the project's files.
///
/// The root is canonicalized when it exists so that relative paths are
/// stable. A missing root gives an empty result.
pub fn load_project_files(root: &Path, filter: &str, scan: &ScanConfig) -> Result<ProjectFiles> {
    let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let paths = discover_files(&root, filter, &scan.excluded_dirs)?;
    let batch = read_files(&paths, &root);
    let structure = StructureSummary::from_paths(&paths, &root);

    tracing::info!(
        root = %root.display(),
        found = batch.total_files,
        read = batch.success_files,
        failed = batch.failed_files,
        "project files loaded"
    );

    Ok(ProjectFiles {
        root,
        paths,
        batch,
        structure,
    })
}

/// Read a project's log file; any failure means "no logs".
fn read_project_logs(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read project log file");
            None
        }
    }
}

/// The configured assembly pipeline.
pub struct ContextPipeline {
    scan: ScanConfig,
    builder: ContextPackBuilder,
}

impl ContextPipeline {
    pub fn new(
        budget: PromptBudget,
        scan: ScanConfig,
        prompt: PromptConfig,
        log_max_chars: usize,
    ) -> Self {
        Self {
            scan,
            builder: ContextPackBuilder::new(budget, prompt, log_max_chars),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PromptBudget::from(&config.context),
            config.scan.clone(),
            config.prompt.clone(),
            config.context.log_max_chars,
        )
    }

    pub fn load(&self, project: &Project) -> Result<ProjectFiles> {
        load_project_files(&project.directory_path, &project.file_type, &self.scan)
    }

    pub fn render_structure(&self, files: &ProjectFiles) -> String {
        files.structure.render(&self.scan.excluded_dirs)
    }

    /// Assemble the prompt for `project` from freshly read files.
    ///
    /// `logs` takes precedence over the project's log file.
    pub fn assemble(
        &self,
        project: &Project,
        user_message: &str,
        logs: Option<&str>,
    ) -> Result<(AssembledPrompt, ContextReport)> {
        let files = self.load(project)?;
        Ok(self.assemble_loaded(project, &files, user_message, logs))
    }

    /// Same as [`Self::assemble`] over already loaded files.
    pub fn assemble_loaded(
        &self,
        project: &Project,
        files: &ProjectFiles,
        user_message: &str,
        logs: Option<&str>,
    ) -> (AssembledPrompt, ContextReport) {
        let file_logs = match (logs, project.log_path.as_deref()) {
            (None, Some(path)) => read_project_logs(path),
            _ => None,
        };
        let structure = self.render_structure(files);

        let input = PromptInput {
            project,
            user_message,
            batch: &files.batch,
            structure: &structure,
            persona: None,
            logs: logs.or(file_logs.as_deref()),
        };
        self.builder.build(&input)
    }
}
