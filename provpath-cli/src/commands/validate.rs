//! `provpath validate`: check a configuration file without using it.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use provpath::config::{Config, ConfigLoader, ConfigValidator};
use provpath::ProviderRegistry;
use std::path::PathBuf;

/// Check that a configuration file parses and its values are usable.
#[derive(Args)]
pub struct ValidateCommand {
    /// File to check
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.is_file() {
            return Err(CliError::InvalidArguments(format!(
                "no such configuration file: {}",
                self.config_path.display()
            )));
        }

        let config = ConfigLoader::load_file(&self.config_path).map_err(|e| {
            eprintln!("Parse error: {e}");
            CliError::SemanticFailure(format!("{} could not be parsed", self.config_path.display()))
        })?;

        // A default provider must also exist among the registered adapters.
        let providers = ConfigValidator::validate(&config)
            .and_then(|()| config.provider_table())
            .map_err(|e| {
                eprintln!("Validation error: {e}");
                CliError::SemanticFailure(format!(
                    "{} failed validation",
                    self.config_path.display()
                ))
            })?;

        println!("Configuration is valid");
        if global.verbose {
            print_summary(&config, &providers);
        }
        Ok(())
    }
}

fn print_summary(config: &Config, providers: &ProviderRegistry) {
    println!("  namespace:        {}", config.effective_namespace());
    println!("  default provider: {}", providers.default_provider().name());
    println!("  batch policy:     {}", config.effective_batch_policy());
    println!("  output format:    {}", config.effective_output_format());
    if let Some(patterns) = &config.exclude {
        println!("  exclude:          {}", patterns.join(", "));
    }
}
