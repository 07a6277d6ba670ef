//! Configuration validation.
//!
//! Checks every field of a merged or per-file configuration before it is
//! turned into a provider table and execution context.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::logging::LogLevel;
use crate::provider::wildcard::WildcardPattern;
use crate::qualify::is_identifier;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use provpath::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { namespace: Some(r"A\Registry::".to_string()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref namespace) = config.namespace {
            Self::validate_namespace(namespace)?;
        }

        if let Some(ref provider) = config.default_provider {
            if !is_identifier(provider) {
                return Err(Error::Validation {
                    field: "default_provider".into(),
                    message: format!("'{provider}' is not a valid provider name"),
                });
            }
        }

        if let Some(ref location) = config.location {
            Self::validate_location("location", location)?;
        }

        if let Some(ref location) = config.registry_location {
            Self::validate_location("registry_location", location)?;
        }

        if let Some(ref mode) = config.log_mode {
            LogLevel::parse(mode).map_err(|message| Error::Validation {
                field: "log_mode".into(),
                message,
            })?;
        }

        if let Some(ref patterns) = config.exclude {
            for pattern in patterns {
                WildcardPattern::new(pattern).map_err(|e| Error::Validation {
                    field: "exclude".into(),
                    message: e.to_string(),
                })?;
            }
        }

        Ok(())
    }

    /// A namespace is one or more identifier segments separated by `\`.
    fn validate_namespace(namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Err(Error::Validation {
                field: "namespace".into(),
                message: "Cannot be empty".into(),
            });
        }

        if !namespace.split('\\').all(is_identifier) {
            return Err(Error::Validation {
                field: "namespace".into(),
                message: format!(
                    "'{namespace}' must consist of letters, digits, '.', '_' or '-' segments separated by '\\'"
                ),
            });
        }

        Ok(())
    }

    fn validate_location(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if value.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        Ok(())
    }
}
