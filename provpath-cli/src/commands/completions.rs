//! `provpath completions`: print a shell completion script.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "provpath";

/// Print a completion script for SHELL on stdout
#[derive(Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# install with: {hint}");
            }
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

/// Where the script usually goes for `shell`.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(
            "provpath completions bash > ~/.local/share/bash-completion/completions/provpath",
        ),
        Shell::Zsh => Some("provpath completions zsh > \"${fpath[1]}/_provpath\""),
        Shell::Fish => Some("provpath completions fish > ~/.config/fish/completions/provpath.fish"),
        Shell::PowerShell => {
            Some("provpath completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}
