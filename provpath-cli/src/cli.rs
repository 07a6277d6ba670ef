//! Argument definitions and dispatch.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use crate::commands::{
    CompletionsCommand, ConvertRegistryCommand, ProvidersCommand, QualifyCommand, ResolveCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving provider-scoped paths.
#[derive(Parser)]
#[command(name = "provpath")]
#[command(version, about = "Resolve and qualify provider-scoped paths", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file in addition to discovered files
    #[arg(long, value_name = "PATH", global = true, env = "PROVPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Filesystem location relative paths resolve against
    #[arg(long, value_name = "PATH", global = true)]
    pub location: Option<String>,

    /// YAML registry snapshot backing the Registry provider
    #[arg(long, value_name = "PATH", global = true)]
    pub registry_file: Option<PathBuf>,

    /// Output format (lines or json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve paths or wildcard patterns to qualified paths
    Resolve(ResolveCommand),

    /// Print the qualified form of a path without looking it up
    Qualify(QualifyCommand),

    /// Convert a registry key to its canonical qualified form
    ConvertRegistry(ConvertRegistryCommand),

    /// List registered providers
    Providers(ProvidersCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

impl Cli {
    /// Splits the parsed arguments into shared options and the subcommand.
    pub fn into_parts(self) -> (GlobalOptions, Command) {
        let global = GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            config: self.config,
            location: self.location,
            registry_file: self.registry_file,
            format: self.format,
        };
        (global, self.command)
    }

    /// Runs the selected subcommand.
    pub fn run(self) -> Result<(), CliError> {
        let (global, command) = self.into_parts();
        match command {
            Command::Resolve(cmd) => cmd.execute(&global),
            Command::Qualify(cmd) => cmd.execute(&global),
            Command::ConvertRegistry(cmd) => cmd.execute(&global),
            Command::Providers(cmd) => cmd.execute(&global),
            Command::Validate(cmd) => cmd.execute(&global),
            Command::Completions(cmd) => cmd.execute(&global),
        }
    }
}
