//! CLI argument definitions using clap derive

use crate::source::SourceConfig;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// repocat - concatenate a repository into one document
///
/// Selects the text files of a local directory or a remote repository,
/// filters them with exclusion and inclusion patterns, and writes them into
/// a single file suitable for pasting into an LLM prompt.
#[derive(Parser, Debug)]
#[command(name = "repocat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REPOCAT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Concatenate the selected files into one document
    Concat(ConcatArgs),

    /// List the files a concatenation would select
    Scan(ScanArgs),

    /// Manage cached repository checkouts
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Where to read files from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Remote repository URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Local directory
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Ignore any cached checkout and fetch again
    #[arg(long)]
    pub refresh: bool,
}

impl SourceArgs {
    /// Source selection for the resolver
    pub fn to_source_config(&self) -> SourceConfig {
        SourceConfig {
            path: self.path.clone(),
            url: self.url.clone(),
            refresh: self.refresh,
        }
    }
}

/// File selection patterns
///
/// Patterns starting with `/` match top-level directories by prefix,
/// patterns containing `*` or `?` are globs, anything else is a regex.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exclude files matching a pattern (repeatable)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Only include files matching a pattern (repeatable)
    #[arg(short, long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,
}

/// Arguments for the concat command
#[derive(Parser, Debug)]
pub struct ConcatArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Preview the selection and ask before writing
    #[arg(long)]
    pub peek: bool,

    /// Answer yes to the preview prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Output directory (default: from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the token estimate
    #[arg(long)]
    pub no_tokens: bool,
}

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Also list excluded files with the reason
    #[arg(long)]
    pub excluded: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached checkouts
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove expired and orphaned entries
    Prune,

    /// Remove every cached checkout
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the cache directory
    Path,
}
