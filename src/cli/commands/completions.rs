//! `azq completions <shell>`: print a completion script to stdout.
//!
//! Install with e.g. `azq completions zsh > ~/.zfunc/_azq`.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let script = render(shell);
    io::stdout().write_all(&script)?;
    Ok(())
}

/// The completion script for `shell`, generated from the clap definition.
pub fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, bin_name, &mut script);
    script
}
