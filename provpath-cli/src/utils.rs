//! Utility functions for CLI operations.
//!
//! This module provides the option plumbing shared by every command:
//! configuration loading with CLI overrides, and the session bundling the
//! provider table, execution context and logger a resolver borrows.

use crate::error::CliError;
use provpath::{
    init_logger, Config, ConfigBuilder, ExecutionContext, Logger, OutputFormat, ProviderRegistry,
    Resolver,
};
use std::env;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Override the filesystem location.
    pub location: Option<String>,

    /// Override the registry snapshot file.
    pub registry_file: Option<PathBuf>,

    /// Override the output format.
    pub format: Option<String>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let output_format = global
        .format
        .as_deref()
        .map(str::parse::<OutputFormat>)
        .transpose()
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

    let mut builder = ConfigBuilder::new().with_config(Config {
        location: global.location.clone(),
        registry_snapshot: global.registry_file.clone(),
        output_format,
        ..Default::default()
    });
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Everything a command needs to resolve paths.
pub struct Session {
    /// The effective configuration.
    pub config: Config,
    /// Providers built from the configuration.
    pub providers: ProviderRegistry,
    /// Locations relative paths resolve against.
    pub context: ExecutionContext,
    /// Diagnostics sink.
    pub logger: Logger,
}

impl Session {
    /// Load configuration and build the provider table and context.
    pub fn open(global: &GlobalOptions) -> Result<Self, CliError> {
        let config = load_configuration(global)?;
        let providers = config.provider_table()?;
        let context = config.execution_context(&env::current_dir()?)?;

        // Explicit flags beat the configured log mode.
        let logger = if global.verbose || global.quiet {
            init_logger(global.verbose, global.quiet)
        } else {
            config
                .log_level()
                .map_or_else(|| init_logger(false, false), Logger::new)
        };
        logger.install();

        Ok(Self {
            config,
            providers,
            context,
            logger,
        })
    }

    /// A resolver borrowing this session.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.providers, &self.context, &self.logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_is_argument_error() {
        let global = GlobalOptions {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        let err = load_configuration(&global).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }
}
