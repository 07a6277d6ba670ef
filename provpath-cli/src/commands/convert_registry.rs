//! Command to convert registry keys to their canonical qualified form.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use clap::Args;
use provpath::RegistryPathConverter;

/// Convert a registry key, optionally to the 32-bit view or a user's hive.
#[derive(Args)]
pub struct ConvertRegistryCommand {
    /// Registry key (e.g. HKLM:\SOFTWARE\Vendor)
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Map the key to the 32-bit registry view
    #[arg(long = "32bit")]
    pub use_32bit_view: bool,

    /// Rebase a HKEY_CURRENT_USER key onto this user's hive
    #[arg(long, value_name = "SID")]
    pub sid: Option<String>,
}

impl ConvertRegistryCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let converter = RegistryPathConverter::new(session.resolver());

        let use_32bit_view =
            self.use_32bit_view || session.config.use_32bit_view.unwrap_or(false);

        match converter.convert(&self.key, use_32bit_view, self.sid.as_deref())? {
            Some(converted) => {
                println!("{converted}");
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!(
                "Cannot convert '{}': key is not under HKEY_CURRENT_USER",
                self.key
            ))),
        }
    }
}
