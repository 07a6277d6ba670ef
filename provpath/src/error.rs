//! Error types for the provpath library.
//!
//! This module provides the error hierarchy for qualification, resolution,
//! filtering and registry path conversion, using `thiserror` for ergonomic
//! error handling.

use std::fmt;

use thiserror::Error;

use crate::provider::ProviderError;

/// Result type alias for operations that may fail with a provpath error.
///
/// # Examples
///
/// ```
/// use provpath::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("FileSystem".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failure, independent of its payload.
///
/// `RegistryRootMismatch` is a soft condition: it is only ever attached to
/// log records, never returned as an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested provider name is not registered.
    ProviderNotFound,
    /// An already-qualified path names a different provider than requested.
    ProviderMismatch,
    /// A strict lookup yielded no items.
    PathNotFound,
    /// The provider failed while looking up items.
    ResolutionError,
    /// A per-SID rewrite was requested for a path outside the per-user hive.
    RegistryRootMismatch,
    /// A path is malformed for its provider.
    InvalidPath,
    /// A wildcard or name filter pattern could not be compiled.
    InvalidPattern,
    /// An input value failed validation.
    Validation,
    /// A configuration file could not be parsed.
    Configuration,
    /// An I/O error outside of provider lookups.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProviderNotFound => "ProviderNotFound",
            Self::ProviderMismatch => "ProviderMismatch",
            Self::PathNotFound => "PathNotFound",
            Self::ResolutionError => "ResolutionError",
            Self::RegistryRootMismatch => "RegistryRootMismatch",
            Self::InvalidPath => "InvalidPath",
            Self::InvalidPattern => "InvalidPattern",
            Self::Validation => "Validation",
            Self::Configuration => "Configuration",
            Self::Io => "Io",
        };
        f.write_str(name)
    }
}

/// The main error type for the provpath library.
#[derive(Debug, Error)]
pub enum Error {
    /// No provider adapter is registered under the requested name.
    #[error("provider not found: {name}")]
    ProviderNotFound {
        /// The provider name that was requested.
        name: String,
    },

    /// A qualified path names a provider that conflicts with the hint.
    #[error("provider mismatch for {path}: expected {expected}, found {found}")]
    ProviderMismatch {
        /// The provider the caller asked for.
        expected: String,
        /// The provider embedded in the path.
        found: String,
        /// The offending path.
        path: String,
    },

    /// A literal lookup matched nothing and non-existent paths were not requested.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The qualified path that was looked up.
        path: String,
    },

    /// The provider failed while looking up items.
    #[error("failed to resolve {path}: {source}")]
    ResolutionError {
        /// The qualified path that was being resolved.
        path: String,
        /// The underlying provider failure.
        #[source]
        source: ProviderError,
    },

    /// A path cannot be normalized by its provider.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A wildcard or glob pattern is malformed.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// Why it could not be compiled.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::{Error, ErrorKind};
    ///
    /// let err = Error::PathNotFound { path: r"FileSystem::/missing".to_string() };
    /// assert_eq!(err.kind(), ErrorKind::PathNotFound);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProviderNotFound { .. } => ErrorKind::ProviderNotFound,
            Self::ProviderMismatch { .. } => ErrorKind::ProviderMismatch,
            Self::PathNotFound { .. } => ErrorKind::PathNotFound,
            Self::ResolutionError { .. } => ErrorKind::ResolutionError,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// The path this error is about, if any.
    #[must_use]
    pub fn target_path(&self) -> Option<&str> {
        match self {
            Self::ProviderMismatch { path, .. }
            | Self::PathNotFound { path }
            | Self::ResolutionError { path, .. }
            | Self::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }

    /// A human-readable next step, suitable for direct display.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::Error;
    ///
    /// let err = Error::ProviderNotFound { name: "Certificate".to_string() };
    /// assert!(err.recommended_action().contains("Certificate"));
    /// ```
    #[must_use]
    pub fn recommended_action(&self) -> String {
        match self {
            Self::ProviderNotFound { name } => {
                format!("Register a provider named '{name}' or use one of the registered providers.")
            }
            Self::ProviderMismatch {
                expected, found, ..
            } => format!(
                "Pass an unqualified path, or request provider '{found}' instead of '{expected}'."
            ),
            Self::PathNotFound { path } => format!(
                "Check that '{path}' exists, or allow non-existent paths to get its qualified form."
            ),
            Self::ResolutionError { path, .. } => {
                format!("Check access permissions and provider health for '{path}'.")
            }
            Self::InvalidPath { reason, .. } => format!("Fix the path: {reason}."),
            Self::InvalidPattern { pattern, .. } => {
                format!("Fix the wildcard syntax in '{pattern}'.")
            }
            Self::Validation { field, .. } => format!("Correct the value supplied for '{field}'."),
            Self::Configuration(_) => "Fix the syntax of the configuration file.".to_string(),
            Self::Io(_) => "Check that the file exists and is readable.".to_string(),
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::Error;
    ///
    /// let err = Error::PathNotFound { path: "Registry::HKEY_USERS\\X".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }
}
