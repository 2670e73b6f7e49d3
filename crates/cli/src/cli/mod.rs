pub mod ask;
pub mod assemble;
pub mod config;
pub mod scan;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use cp_domain::config::{Config, ConfigSeverity};
use cp_domain::project::Project;

/// codeprompt: assemble budgeted LLM prompts from a project directory.
#[derive(Debug, Parser)]
#[command(name = "codeprompt", version, about)]
pub struct Cli {
    /// Config file (overrides `CP_CONFIG` and ./codeprompt.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the filtered project structure and read summary.
    Scan {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Build the prompt for a request and print it.
    Assemble {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        request: RequestArgs,
        /// Print the prompt and selection report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Build the prompt, send it to the configured model, print the reply.
    Ask {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        request: RequestArgs,
        /// Model override (defaults to `llm.provider.default_model`).
        #[arg(long)]
        model: Option<String>,
        /// Print the reply and selection report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

/// The project record, given on the command line.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project root directory.
    pub dir: PathBuf,
    /// Extension filter, e.g. ".py" or ".py,.md".
    #[arg(short = 't', long = "types", default_value = ".py")]
    pub file_type: String,
    /// Project name (defaults to the directory name).
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub id: i64,
    #[arg(long)]
    pub description: Option<String>,
    /// Project log file, used when `--logs` is not given.
    #[arg(long)]
    pub log_path: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn to_project(&self) -> Project {
        let name = self.name.clone().unwrap_or_else(|| {
            self.dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let mut project = Project::new(self.id, name, &self.dir, &self.file_type);
        project.description = self.description.clone();
        project.log_path = self.log_path.clone();
        project
    }
}

#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// The user's request.
    #[arg(short, long)]
    pub message: String,
    /// File with logs to attach to this request.
    #[arg(long)]
    pub logs: Option<PathBuf>,
}

impl RequestArgs {
    pub fn read_logs(&self) -> anyhow::Result<Option<String>> {
        self.logs
            .as_deref()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("reading logs {}", path.display()))
            })
            .transpose()
    }
}

// ── Config loading helper ─────────────────────────────────────────────

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "codeprompt.toml";

/// Load the configuration from `explicit`, else the path in `CP_CONFIG`,
/// else `codeprompt.toml`. Returns the parsed [`Config`] and the path that
/// was used.
///
/// An explicit path must exist; the fallbacks silently yield defaults when
/// the file is absent.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, String)> {
    let (config_path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (
            std::env::var_os("CP_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            false,
        ),
    };
    let shown = config_path.display().to_string();

    let config = if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {shown}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {shown}: {e}"))?
    } else if required {
        anyhow::bail!("config file {shown} does not exist");
    } else {
        Config::default()
    };

    Ok((config, shown))
}

/// Refuse to run with configuration errors; log warnings.
pub fn ensure_valid(config: &Config, config_path: &str) -> anyhow::Result<()> {
    let mut errors = Vec::new();
    for issue in config.validate() {
        match issue.severity {
            ConfigSeverity::Error => errors.push(issue.to_string()),
            ConfigSeverity::Warning => {
                tracing::warn!(field = %issue.field, "{}", issue.message)
            }
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("invalid config {config_path}:\n{}", errors.join("\n"))
    }
}
