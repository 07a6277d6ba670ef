//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PROVPATH_*` environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::resolver::BatchPolicy;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use provpath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g. an unknown batch policy or a malformed boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(namespace) = env::var("PROVPATH_NAMESPACE") {
            config.namespace = Some(namespace);
        }

        if let Ok(provider) = env::var("PROVPATH_DEFAULT_PROVIDER") {
            config.default_provider = Some(provider);
        }

        if let Ok(location) = env::var("PROVPATH_LOCATION") {
            config.location = Some(location);
        }

        if let Ok(location) = env::var("PROVPATH_REGISTRY_LOCATION") {
            config.registry_location = Some(location);
        }

        if let Ok(snapshot) = env::var("PROVPATH_REGISTRY_SNAPSHOT") {
            config.registry_snapshot = Some(PathBuf::from(snapshot));
        }

        if let Ok(val) = env::var("PROVPATH_FORCE") {
            config.force = Some(Self::parse_bool("PROVPATH_FORCE", &val)?);
        }

        if let Ok(val) = env::var("PROVPATH_USE_32BIT_VIEW") {
            config.use_32bit_view = Some(Self::parse_bool("PROVPATH_USE_32BIT_VIEW", &val)?);
        }

        if let Ok(val) = env::var("PROVPATH_BATCH_POLICY") {
            config.batch_policy =
                Some(BatchPolicy::parse(&val).map_err(|message| Error::Validation {
                    field: "PROVPATH_BATCH_POLICY".into(),
                    message,
                })?);
        }

        if let Ok(val) = env::var("PROVPATH_OUTPUT_FORMAT") {
            config.output_format = Some(val.parse().map_err(|_| Error::Validation {
                field: "PROVPATH_OUTPUT_FORMAT".into(),
                message: format!("Invalid output format: '{val}' (expected lines or json)"),
            })?);
        }

        if let Ok(val) = env::var(crate::logging::LOG_MODE_ENV) {
            LogLevel::parse(&val).map_err(|message| Error::Validation {
                field: crate::logging::LOG_MODE_ENV.into(),
                message,
            })?;
            config.log_mode = Some(val);
        }

        // PROVPATH_EXCLUDE (comma-separated, appended)
        if let Ok(val) = env::var("PROVPATH_EXCLUDE") {
            let patterns = Self::parse_list(&val);
            match &mut config.exclude {
                Some(existing) => existing.extend(patterns),
                None => config.exclude = Some(patterns),
            }
        }

        Ok(())
    }

    /// Parse boolean from string (supports multiple formats).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}
