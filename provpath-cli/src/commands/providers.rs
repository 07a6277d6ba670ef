//! Command to list registered providers.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use clap::Args;
use provpath::OutputFormat;
use serde::Serialize;

/// List the providers paths can be resolved through.
#[derive(Args)]
pub struct ProvidersCommand {}

#[derive(Serialize)]
struct ProviderEntry<'a> {
    name: &'a str,
    namespace: &'a str,
    default: bool,
}

impl ProvidersCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let default_name = session.providers.default_provider().name();

        let entries: Vec<ProviderEntry<'_>> = session
            .providers
            .iter()
            .map(|p| ProviderEntry {
                name: p.name(),
                namespace: p.namespace(),
                default: p.name() == default_name,
            })
            .collect();

        match session.config.effective_output_format() {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&entries)
                    .map_err(|e| CliError::InvalidArguments(format!("JSON output: {e}")))?;
                println!("{json}");
            }
            OutputFormat::Lines => {
                for entry in &entries {
                    let marker = if entry.default { " (default)" } else { "" };
                    println!("{}\\{}{marker}", entry.namespace, entry.name);
                }
            }
        }
        Ok(())
    }
}
