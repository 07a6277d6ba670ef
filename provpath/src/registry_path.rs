//! Registry path conversion.
//!
//! [`RegistryPathConverter`] turns any registry key spelling into its
//! canonical qualified form, optionally remapped to the 32-bit view and
//! optionally rebased from the per-user hive onto a specific user's SID.
//! The key does not need to exist.

use crate::error::{Error, ErrorKind, Result};
use crate::hive::RegistryHiveMap;
use crate::logging::LogRecord;
use crate::provider::REGISTRY_PROVIDER;
use crate::qualify::QualifiedPath;
use crate::resolver::{PathSpec, ResolveOptions, Resolver};

/// Converts registry keys to canonical qualified paths.
///
/// # Examples
///
/// ```
/// use provpath::logging::NullSink;
/// use provpath::{ExecutionContext, ProviderRegistry, RegistryPathConverter, Resolver};
/// use std::path::PathBuf;
///
/// let providers = ProviderRegistry::with_defaults();
/// let ctx = ExecutionContext::new(PathBuf::from("/"));
/// let converter = RegistryPathConverter::new(Resolver::new(&providers, &ctx, &NullSink));
///
/// let path = converter.convert(r"HKLM\SOFTWARE\X", false, None).unwrap();
/// assert_eq!(
///     path.as_deref(),
///     Some(r"Provpath.Core\Registry::HKEY_LOCAL_MACHINE\SOFTWARE\X")
/// );
///
/// let per_user = converter
///     .convert(r"HKCU\SOFTWARE\X", false, Some("S-1-5-21-1000"))
///     .unwrap();
/// assert_eq!(
///     per_user.as_deref(),
///     Some(r"Provpath.Core\Registry::HKEY_USERS\S-1-5-21-1000\SOFTWARE\X")
/// );
///
/// // Machine keys cannot be rebased; the conversion is declined.
/// assert_eq!(converter.convert(r"HKLM\SOFTWARE\X", false, Some("S-1-5-21-1000")).unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RegistryPathConverter<'a> {
    resolver: Resolver<'a>,
    hives: &'a RegistryHiveMap,
}

impl<'a> RegistryPathConverter<'a> {
    /// Creates a converter using the standard hive tables.
    #[must_use]
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self::with_hives(resolver, RegistryHiveMap::standard())
    }

    /// Creates a converter using custom hive tables.
    #[must_use]
    pub fn with_hives(resolver: Resolver<'a>, hives: &'a RegistryHiveMap) -> Self {
        Self { resolver, hives }
    }

    /// Converts `key` to a qualified registry path.
    ///
    /// The 32-bit substitutions only apply when `use_32bit_view` is set and
    /// the execution context is 64-bit. Returns `Ok(None)` when `sid` is given
    /// but the key is not under the per-user hive; that case is logged with
    /// [`ErrorKind::RegistryRootMismatch`].
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `sid` is malformed
    /// - [`Error::ProviderMismatch`] if `key` is qualified for another provider
    /// - any error from qualifying or looking up the key
    pub fn convert(
        &self,
        key: &str,
        use_32bit_view: bool,
        sid: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(sid) = sid {
            validate_sid(sid)?;
        }

        let opts = ResolveOptions::new()
            .with_provider(REGISTRY_PROVIDER)
            .with_include_non_existent(true);
        let items = self.resolver.resolve_spec(&PathSpec::literal(key), &opts)?;
        let Some(item) = items.into_iter().next() else {
            return Ok(None);
        };
        let qualified = item.path;

        let mut native = qualified.native().to_string();
        if use_32bit_view && self.resolver.qualifier().context().is_64bit_process() {
            native = self.hives.apply_wow64(&native);
        }

        if let Some(sid) = sid {
            let Some(rebased) = self.hives.rebase_to_sid(&native, sid) else {
                self.resolver.sink().record(
                    LogRecord::info(format!(
                        "cannot rebase {qualified} onto SID {sid}: key is not under the per-user hive"
                    ))
                    .with_kind(ErrorKind::RegistryRootMismatch),
                );
                return Ok(None);
            };
            native = rebased;
        }

        Ok(Some(
            QualifiedPath::new(qualified.namespace(), qualified.provider(), native).to_string(),
        ))
    }
}

/// Checks that `sid` looks like a security identifier.
///
/// # Errors
///
/// Returns [`Error::Validation`] if `sid` does not start with `S-` or
/// contains a path separator.
///
/// # Examples
///
/// ```
/// use provpath::registry_path::validate_sid;
///
/// assert!(validate_sid("S-1-5-18").is_ok());
/// assert!(validate_sid(r"S-1\..\x").is_err());
/// assert!(validate_sid("1-5-18").is_err());
/// ```
pub fn validate_sid(sid: &str) -> Result<()> {
    if !sid.starts_with("S-") && !sid.starts_with("s-") {
        return Err(Error::Validation {
            field: "sid".to_string(),
            message: format!("'{sid}' must start with 'S-'"),
        });
    }
    if sid.len() <= 2 || sid.contains(['\\', '/']) || sid.chars().any(char::is_whitespace) {
        return Err(Error::Validation {
            field: "sid".to_string(),
            message: format!("'{sid}' is not a valid security identifier"),
        });
    }
    Ok(())
}
