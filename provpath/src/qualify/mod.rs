//! Provider-qualified paths.
//!
//! A qualified path names its owning provider explicitly:
//!
//! ```text
//! Provpath.Core\FileSystem::/var/log/syslog
//! Provpath.Core\Registry::HKEY_LOCAL_MACHINE\SOFTWARE\Vendor
//! ```
//!
//! [`PathQualifier`] turns raw user input into that form. It never touches
//! the backing store; existence is the resolver's business.

use std::fmt;

use serde::Serialize;

use crate::context::ExecutionContext;
use crate::error::{Error, Result};
use crate::provider::{ProviderAdapter, ProviderRegistry};

/// Separator between the provider prefix and the native path.
pub const PROVIDER_SEPARATOR: &str = "::";

/// A path tagged with its provider.
///
/// # Examples
///
/// ```
/// use provpath::QualifiedPath;
///
/// let path = QualifiedPath::new("Provpath.Core", "FileSystem", "/etc/hosts");
/// assert_eq!(path.to_string(), r"Provpath.Core\FileSystem::/etc/hosts");
///
/// let parsed = QualifiedPath::parse(r"Registry::HKEY_USERS").unwrap();
/// assert_eq!(parsed.namespace(), "");
/// assert_eq!(parsed.provider(), "Registry");
/// assert_eq!(parsed.native(), "HKEY_USERS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedPath {
    namespace: String,
    provider: String,
    native: String,
}

impl QualifiedPath {
    /// Creates a qualified path from its parts.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        provider: impl Into<String>,
        native: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            provider: provider.into(),
            native: native.into(),
        }
    }

    /// Splits an already-qualified string into its parts.
    ///
    /// Returns `None` if `raw` has no `[namespace\]provider::` prefix. The
    /// prefix must consist of `\`-separated identifier segments, so native
    /// paths that merely contain `::` further along are not mistaken for
    /// qualified ones.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (prefix, native) = raw.split_once(PROVIDER_SEPARATOR)?;
        let (namespace, provider) = match prefix.rsplit_once('\\') {
            Some((namespace, provider)) => (namespace, provider),
            None => ("", prefix),
        };

        if !is_identifier(provider) {
            return None;
        }
        if !namespace.is_empty() && !namespace.split('\\').all(is_identifier) {
            return None;
        }

        Some(Self::new(namespace, provider, native))
    }

    /// Module namespace; empty if the input omitted it.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Provider name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Provider-native path.
    #[must_use]
    pub fn native(&self) -> &str {
        &self.native
    }
}

impl fmt::Display for QualifiedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}{PROVIDER_SEPARATOR}{}", self.provider, self.native)
        } else {
            write!(
                f,
                "{}\\{}{PROVIDER_SEPARATOR}{}",
                self.namespace, self.provider, self.native
            )
        }
    }
}

/// Whether `s` is a non-empty run of identifier characters.
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Maps raw input to qualified paths.
///
/// # Examples
///
/// ```
/// use provpath::{ExecutionContext, PathQualifier, ProviderRegistry};
/// use std::path::PathBuf;
///
/// let providers = ProviderRegistry::with_defaults();
/// let ctx = ExecutionContext::new(PathBuf::from("/"));
/// let qualifier = PathQualifier::new(&providers, &ctx);
///
/// let path = qualifier.qualify(r"HKLM\SOFTWARE\X", Some("Registry")).unwrap();
/// assert_eq!(
///     path.to_string(),
///     r"Provpath.Core\Registry::HKEY_LOCAL_MACHINE\SOFTWARE\X"
/// );
///
/// // Qualifying again is a no-op.
/// let again = qualifier.qualify(&path.to_string(), Some("Registry")).unwrap();
/// assert_eq!(again, path);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathQualifier<'a> {
    providers: &'a ProviderRegistry,
    ctx: &'a ExecutionContext,
}

impl<'a> PathQualifier<'a> {
    /// Creates a qualifier over `providers`.
    #[must_use]
    pub fn new(providers: &'a ProviderRegistry, ctx: &'a ExecutionContext) -> Self {
        Self { providers, ctx }
    }

    /// Qualifies `raw`, optionally constrained to the provider named `hint`.
    ///
    /// - Qualified input keeps its embedded provider, which must agree with
    ///   `hint` when one is given.
    /// - Unqualified input with a hint is taken as a native path of the hinted
    ///   provider.
    /// - Unqualified input without a hint goes to the first provider claiming
    ///   it, or the default provider.
    ///
    /// The result always carries the owning adapter's namespace.
    ///
    /// # Errors
    ///
    /// - [`Error::ProviderNotFound`] if `hint` or the embedded provider is not
    ///   registered
    /// - [`Error::ProviderMismatch`] if the embedded provider differs from `hint`
    /// - [`Error::InvalidPath`] if the provider cannot normalize the input
    pub fn qualify(&self, raw: &str, hint: Option<&str>) -> Result<QualifiedPath> {
        let hinted = hint.map(|name| self.providers.get(name)).transpose()?;

        if let Some(parsed) = QualifiedPath::parse(raw) {
            let provider = match hinted {
                Some(hinted) if !hinted.name().eq_ignore_ascii_case(parsed.provider()) => {
                    return Err(Error::ProviderMismatch {
                        expected: hinted.name().to_string(),
                        found: parsed.provider().to_string(),
                        path: raw.to_string(),
                    });
                }
                Some(hinted) => hinted,
                None => self.providers.get(parsed.provider())?,
            };
            if !parsed.namespace().is_empty() && parsed.namespace() != provider.namespace() {
                log::debug!(
                    "requalifying {raw} from namespace {} to {}",
                    parsed.namespace(),
                    provider.namespace()
                );
            }
            return self.qualify_native(provider.as_ref(), parsed.native());
        }

        let provider = hinted.unwrap_or_else(|| self.providers.provider_for(raw));
        self.qualify_native(provider.as_ref(), raw)
    }

    /// Qualifies `raw` as a native path of `provider` without any dispatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot normalize the input.
    pub fn qualify_native(
        &self,
        provider: &dyn ProviderAdapter,
        raw: &str,
    ) -> Result<QualifiedPath> {
        let native = provider.normalize(raw, self.ctx)?;
        Ok(QualifiedPath::new(provider.namespace(), provider.name(), native))
    }

    /// The provider table this qualifier dispatches over.
    #[must_use]
    pub fn providers(&self) -> &'a ProviderRegistry {
        self.providers
    }

    /// The execution context used for normalization.
    #[must_use]
    pub fn context(&self) -> &'a ExecutionContext {
        self.ctx
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
