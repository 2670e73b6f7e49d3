use clap::Parser;
use tracing_subscriber::EnvFilter;

use cp_cli::cli::{self, Cli, Command, ConfigCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_cli_tracing(args.verbose, args.log_json);

    let (config, config_path) = cli::load_config(args.config.as_deref())?;

    match args.command {
        Command::Scan { project } => {
            cli::ensure_valid(&config, &config_path)?;
            cli::scan::run(&config, project).await
        }
        Command::Assemble {
            project,
            request,
            json,
        } => {
            cli::ensure_valid(&config, &config_path)?;
            cli::assemble::run(&config, project, request, json).await
        }
        Command::Ask {
            project,
            request,
            model,
            json,
        } => {
            cli::ensure_valid(&config, &config_path)?;
            cli::ask::run(&config, project, request, model, json).await
        }
        Command::Config(ConfigCommand::Validate) => {
            if !cli::config::validate(&config, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => cli::config::show(&config),
    }
}

/// Initialize stderr-only tracing for CLI commands.
///
/// Defaults to `warn` so diagnostic output does not pollute stdout;
/// `RUST_LOG` overrides the level.
fn init_cli_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
