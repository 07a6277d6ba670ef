//! Configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource, EXPLICIT_PRECEDENCE};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from all sources.
///
/// # Examples
///
/// ```
/// use provpath::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { force: Some(true), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.force, Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Vec<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads files and environment variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project configuration is discovered from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Loads the user configuration from `dir` instead of `~/.provpath`.
    #[must_use]
    pub fn with_user_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Adds an explicit configuration file above discovered files.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Adds a programmatic override with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Skips user and project configuration files.
    ///
    /// An explicit file set with [`with_config_file`](Self::with_config_file)
    /// is still read.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips `PROVPATH_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads, merges and validates every source.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            sources.extend(ConfigLoader::load_all(&working_dir, self.user_dir.as_deref())?);
        }

        if let Some(path) = self.config_file {
            let config = ConfigLoader::load_file(&path)?;
            sources.push(ConfigSource {
                path,
                precedence: EXPLICIT_PRECEDENCE,
                config,
            });
        }

        for source in &sources {
            log::debug!("loaded configuration from {}", source.path.display());
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for overrides in &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
