//! Provider adapters and the provider table.
//!
//! A provider is a hierarchical namespace (the filesystem, the registry, a
//! certificate store, ...) that the engine can enumerate uniformly. Each one
//! is represented by a [`ProviderAdapter`]; adapters are collected in a
//! [`ProviderRegistry`] that is built once and only read afterwards.
//!
//! # Examples
//!
//! ```
//! use provpath::provider::{ProviderRegistry, FILESYSTEM_PROVIDER, REGISTRY_PROVIDER};
//!
//! let providers = ProviderRegistry::with_defaults();
//! assert!(providers.get(FILESYSTEM_PROVIDER).is_ok());
//! assert!(providers.get("registry").is_ok());
//! assert_eq!(providers.default_provider().name(), FILESYSTEM_PROVIDER);
//! assert!(providers.get("Certificate").is_err());
//! # let _ = REGISTRY_PROVIDER;
//! ```

pub mod filesystem;
pub mod normalize;
pub mod registry;
mod table;
pub mod wildcard;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::context::ExecutionContext;
use crate::error::Result;

pub use filesystem::FileSystemProvider;
pub use registry::{MemoryRegistry, RegistryProvider, RegistryStore};
pub use table::ProviderRegistry;

/// Namespace prefixed to qualified paths unless a provider is built with another.
pub const DEFAULT_NAMESPACE: &str = "Provpath.Core";

/// Name of the built-in filesystem provider.
pub const FILESYSTEM_PROVIDER: &str = "FileSystem";

/// Name of the built-in registry provider.
pub const REGISTRY_PROVIDER: &str = "Registry";

/// What kind of item a provider reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// An item that can hold other items (directory, registry key).
    Container,
    /// A terminal item (file).
    Leaf,
    /// The kind is not known, e.g. for synthesized non-existent items.
    Unknown,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::Leaf => write!(f, "leaf"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One concrete item reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderItem {
    /// The provider-native absolute path of the item.
    pub native: String,
    /// Container or leaf.
    pub kind: ItemKind,
}

impl ProviderItem {
    /// Creates an item.
    #[must_use]
    pub fn new(native: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            native: native.into(),
            kind,
        }
    }
}

/// How a provider should look up a native path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Treat the path verbatim; never expand wildcards.
    pub literal: bool,
    /// Include hidden or system items in wildcard expansion.
    pub force: bool,
    /// Byte length of the leading part of the native path that names a
    /// location taken from the execution context. Metacharacters there are
    /// matched literally.
    pub anchor: usize,
}

/// Failure reported by a provider adapter.
///
/// The resolver wraps these into [`crate::Error::ResolutionError`] together
/// with the qualified path, except for `InvalidPattern` which surfaces as
/// [`crate::Error::InvalidPattern`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Access to an item was denied.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The native path that could not be read.
        path: String,
    },

    /// The backing store failed with an I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The native path being read.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A wildcard segment could not be compiled.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending segment.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Any other backend failure.
    #[error("provider failure: {message}")]
    Backend {
        /// Details from the backend.
        message: String,
    },
}

impl ProviderError {
    /// Maps an I/O error for `path`, splitting out permission failures.
    #[must_use]
    pub fn from_io(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                path: path.to_string(),
            }
        } else {
            Self::Io {
                path: path.to_string(),
                source,
            }
        }
    }
}

/// A provider the engine can dispatch to.
///
/// Adapters are immutable and shared between resolution calls, so they must
/// be `Send + Sync`. None of the methods check existence except
/// [`resolve_items`](Self::resolve_items) and
/// [`is_container`](Self::is_container).
pub trait ProviderAdapter: Send + Sync {
    /// Provider name, e.g. `FileSystem`.
    fn name(&self) -> &str;

    /// Module namespace used when qualifying paths of this provider.
    fn namespace(&self) -> &str {
        DEFAULT_NAMESPACE
    }

    /// Whether an unqualified input is written in a form only this provider
    /// understands, such as a drive prefix (`HKLM:\...`).
    fn claims(&self, _raw: &str) -> bool {
        false
    }

    /// The native location relative input is resolved against, if any.
    ///
    /// The resolver uses it to keep context segments out of wildcard
    /// expansion.
    fn base(&self, _ctx: &ExecutionContext) -> Option<String> {
        None
    }

    /// Turns user input into this provider's absolute native form.
    ///
    /// Must be idempotent: normalizing an already-normalized path returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be expressed as a native path.
    fn normalize(&self, raw: &str, ctx: &ExecutionContext) -> Result<String>;

    /// Enumerates the items matching `native`.
    ///
    /// An empty vector means nothing matched; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn resolve_items(
        &self,
        native: &str,
        query: ItemQuery,
    ) -> std::result::Result<Vec<ProviderItem>, ProviderError>;

    /// Tests whether `native` is a container; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn is_container(&self, native: &str) -> std::result::Result<Option<bool>, ProviderError>;

    /// The last component of `native`.
    fn parse_leaf(&self, native: &str) -> String;
}
