//! repocat - repository concatenation CLI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use repocat::cli::{Cli, Commands};
use repocat::config::{Config, ConfigManager};
use repocat::error::RepocatResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RepocatResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions { shell } = cli.command {
        return repocat::cli::commands::completions(shell);
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Concat(args) => repocat::cli::commands::concat(args, &config).await,
        Commands::Scan(args) => repocat::cli::commands::scan(args, &config).await,
        Commands::Cache(args) => repocat::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            repocat::cli::commands::config(args, &config_manager, &config).await
        }
    }
}

/// Install the tracing subscriber: 0 = warn, 1 = info, 2+ = debug.
/// `RUST_LOG` takes precedence when set.
fn init_logging(verbose: u8, config: &Config) {
    let default = match verbose {
        0 => "repocat=warn",
        1 => "repocat=info",
        _ => "repocat=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
