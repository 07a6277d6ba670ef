//! Command to print the qualified form of a path.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use clap::Args;
use provpath::PathQualifier;

/// Qualify a path without checking that it exists.
#[derive(Args)]
pub struct QualifyCommand {
    /// Path to qualify
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Qualify through this provider
    #[arg(long, value_name = "NAME")]
    pub provider: Option<String>,
}

impl QualifyCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let qualifier = PathQualifier::new(&session.providers, &session.context);

        let qualified = qualifier.qualify(&self.path, self.provider.as_deref())?;
        println!("{qualified}");
        Ok(())
    }
}
