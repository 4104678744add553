//! Completions command - print shell completion scripts

use crate::cli::args::Cli;
use crate::error::RepocatResult;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

/// Write the completion script for `shell` to stdout
pub fn execute(shell: Shell) -> RepocatResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
