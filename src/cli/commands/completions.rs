//! `proton-migrate completions` — print a shell completion script.
//!
//!   proton-migrate completions bash > ~/.local/share/bash-completion/completions/proton-migrate

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Write the completion script for `shell` to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    generate(shell, &mut Cli::command(), "proton-migrate", &mut io::stdout());
    Ok(())
}
