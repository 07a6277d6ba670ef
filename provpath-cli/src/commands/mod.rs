//! One module per subcommand:
//! - `resolve`: Resolve paths and wildcard patterns
//! - `qualify`: Qualify a path without looking it up
//! - `convert_registry`: Convert a registry key to canonical form
//! - `providers`: List registered providers
//! - `validate`: Validate configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod convert_registry;
pub mod providers;
pub mod qualify;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use convert_registry::ConvertRegistryCommand;
pub use providers::ProvidersCommand;
pub use qualify::QualifyCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
