//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; the
//! `effective_*` accessors supply the built-in defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::logging::LogLevel;
use crate::output::OutputFormat;
use crate::provider::normalize::normalize;
use crate::provider::{MemoryRegistry, ProviderRegistry, RegistryStore, DEFAULT_NAMESPACE};
use crate::resolver::BatchPolicy;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use provpath::config::Config;
/// use provpath::BatchPolicy;
///
/// let config: Config = serde_yaml::from_str("
/// namespace: Acme.Tools
/// batch_policy: continue
/// exclude: ['*.bak']
/// ").unwrap();
/// assert_eq!(config.effective_namespace(), "Acme.Tools");
/// assert_eq!(config.effective_batch_policy(), BatchPolicy::ContinueOnError);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Module namespace prefixed to qualified paths.
    pub namespace: Option<String>,

    /// Provider receiving unqualified, unclaimed input.
    pub default_provider: Option<String>,

    /// Filesystem location relative paths resolve against.
    pub location: Option<String>,

    /// Registry key relative keys resolve against.
    pub registry_location: Option<String>,

    /// YAML registry snapshot backing the registry provider.
    pub registry_snapshot: Option<PathBuf>,

    /// Include hidden items in wildcard expansion.
    pub force: Option<bool>,

    /// Map registry conversions to the 32-bit view.
    pub use_32bit_view: Option<bool>,

    /// Failure handling across multiple path specs.
    pub batch_policy: Option<BatchPolicy>,

    /// Output format for result listings.
    pub output_format: Option<OutputFormat>,

    /// Verbosity (`quiet`, `normal` or `verbose`).
    pub log_mode: Option<String>,

    /// Leaf patterns always excluded from results (accumulated across sources).
    pub exclude: Option<Vec<String>>,
}

impl Config {
    /// The namespace, or the built-in default.
    #[must_use]
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// The batch policy, defaulting to fail-fast.
    #[must_use]
    pub fn effective_batch_policy(&self) -> BatchPolicy {
        self.batch_policy.unwrap_or_default()
    }

    /// The output format, defaulting to lines.
    #[must_use]
    pub fn effective_output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// The configured log level, if any and valid.
    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_mode.as_deref().and_then(|m| LogLevel::parse(m).ok())
    }

    /// Builds the provider table described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry snapshot cannot be loaded or the
    /// default provider is not registered.
    pub fn provider_table(&self) -> Result<ProviderRegistry> {
        let store: Arc<dyn RegistryStore> = match &self.registry_snapshot {
            Some(path) => Arc::new(MemoryRegistry::from_file(path)?),
            None => Arc::new(MemoryRegistry::new()),
        };

        let table = ProviderRegistry::with_namespace(self.effective_namespace(), store);
        match &self.default_provider {
            Some(name) => table.with_default(name),
            None => Ok(table),
        }
    }

    /// Builds the execution context, resolving `location` against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if `location` cannot be normalized.
    pub fn execution_context(&self, cwd: &Path) -> Result<ExecutionContext> {
        let location = match &self.location {
            Some(location) => PathBuf::from(normalize(location, cwd)?),
            None => cwd.to_path_buf(),
        };

        let mut ctx = ExecutionContext::new(location);
        if let Some(registry_location) = &self.registry_location {
            ctx = ctx.with_registry_location(registry_location.clone());
        }
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FILESYSTEM_PROVIDER, REGISTRY_PROVIDER};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.effective_namespace(), DEFAULT_NAMESPACE);
        assert_eq!(config.effective_batch_policy(), BatchPolicy::FailFast);
        assert_eq!(config.effective_output_format(), OutputFormat::Lines);
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn test_deserialize_full() {
        let yaml = r"
namespace: Acme.Tools
default_provider: Registry
location: /srv
registry_location: 'HKLM:\SOFTWARE'
force: true
use_32bit_view: false
batch_policy: fail-fast
output_format: json
log_mode: verbose
exclude:
  - '*.tmp'
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_provider.as_deref(), Some("Registry"));
        assert_eq!(config.force, Some(true));
        assert_eq!(config.effective_output_format(), OutputFormat::Json);
        assert_eq!(config.log_level(), Some(LogLevel::Verbose));
        assert_eq!(config.exclude, Some(vec!["*.tmp".to_string()]));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("ports: 5000\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_table_namespace_and_default() {
        let config = Config {
            namespace: Some("Acme.Tools".to_string()),
            default_provider: Some("registry".to_string()),
            ..Default::default()
        };
        let table = config.provider_table().unwrap();
        assert_eq!(table.default_provider().name(), REGISTRY_PROVIDER);
        assert_eq!(table.get(FILESYSTEM_PROVIDER).unwrap().namespace(), "Acme.Tools");
    }

    #[test]
    fn test_provider_table_unknown_default() {
        let config = Config {
            default_provider: Some("Certificate".to_string()),
            ..Default::default()
        };
        assert!(config.provider_table().is_err());
    }

    #[test]
    fn test_provider_table_loads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("registry.yaml");
        std::fs::write(&snapshot, "keys:\n  - 'HKLM\\SOFTWARE\\Vendor'\n").unwrap();

        let config = Config {
            registry_snapshot: Some(snapshot),
            ..Default::default()
        };
        let table = config.provider_table().unwrap();
        let registry = table.get(REGISTRY_PROVIDER).unwrap();
        assert_eq!(
            registry.is_container(r"HKEY_LOCAL_MACHINE\SOFTWARE\Vendor").unwrap(),
            Some(true)
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_execution_context_relative_location() {
        let config = Config {
            location: Some("sub/../data".to_string()),
            registry_location: Some(r"HKCU:\Software".to_string()),
            ..Default::default()
        };
        let ctx = config.execution_context(Path::new("/work")).unwrap();
        assert_eq!(ctx.location(), Path::new("/work/data"));
        assert_eq!(ctx.registry_location(), Some(r"HKCU:\Software"));
    }
}
