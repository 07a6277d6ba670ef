//! The registry provider.
//!
//! Native registry paths are `\`-separated key paths rooted at a canonical
//! hive name (`HKEY_LOCAL_MACHINE\SOFTWARE\Vendor`). Keys are always
//! containers; values are not items. The actual key tree lives behind the
//! [`RegistryStore`] trait so hosts can plug in a live registry, while
//! [`MemoryRegistry`] serves snapshots and tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::wildcard::{has_wildcard, split_anchor, WildcardPattern};
use super::{
    ItemKind, ItemQuery, ProviderAdapter, ProviderError, ProviderItem, DEFAULT_NAMESPACE,
    REGISTRY_PROVIDER,
};
use crate::context::ExecutionContext;
use crate::error::{Error, Result};
use crate::hive::RegistryHiveMap;

/// Read access to a registry key tree.
///
/// Key paths passed in are canonical native paths; comparisons are
/// case-insensitive. The empty path denotes the provider root, whose
/// children are the hives.
pub trait RegistryStore: Send + Sync {
    /// The stored spelling of `key`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn lookup(&self, key: &str) -> std::result::Result<Option<String>, ProviderError>;

    /// Names of the direct subkeys of `key`, in a stable order.
    ///
    /// A missing key has no subkeys.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn subkeys(&self, key: &str) -> std::result::Result<Vec<String>, ProviderError>;
}

/// An in-memory registry key tree.
///
/// Inserting a key also creates all of its ancestors.
///
/// # Examples
///
/// ```
/// use provpath::provider::{MemoryRegistry, RegistryStore};
///
/// let registry = MemoryRegistry::from_keys([r"HKEY_LOCAL_MACHINE\SOFTWARE\Vendor"]);
/// assert_eq!(
///     registry.lookup(r"hkey_local_machine\software").unwrap().as_deref(),
///     Some(r"HKEY_LOCAL_MACHINE\SOFTWARE")
/// );
/// assert_eq!(registry.subkeys("").unwrap(), vec!["HKEY_LOCAL_MACHINE"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    // lowercase path -> stored spelling
    keys: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistrySnapshot {
    keys: Vec<String>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `keys` and their ancestors.
    #[must_use]
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for key in keys {
            registry.insert(key.as_ref());
        }
        registry
    }

    /// Parses a YAML snapshot of the form `keys: [<key path>, ...]`.
    ///
    /// Hive aliases in the snapshot are expanded to canonical roots.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::provider::{MemoryRegistry, RegistryStore};
    ///
    /// let registry = MemoryRegistry::from_yaml("keys:\n  - 'HKLM\\SOFTWARE\\Vendor'\n").unwrap();
    /// assert!(registry.lookup(r"HKEY_LOCAL_MACHINE\SOFTWARE\Vendor").unwrap().is_some());
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let snapshot: RegistrySnapshot = serde_yaml::from_str(yaml)?;
        let hives = RegistryHiveMap::standard();
        Ok(Self::from_keys(snapshot.keys.iter().map(|key| {
            let key = clean_separators(key);
            hives.expand(&key).unwrap_or(key)
        })))
    }

    /// Loads a YAML snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Adds `key` and all of its ancestors.
    ///
    /// Existing spellings are kept.
    pub fn insert(&mut self, key: &str) {
        let mut current = String::new();
        for segment in key.split('\\').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('\\');
            }
            current.push_str(segment);
            self.keys
                .entry(current.to_lowercase())
                .or_insert_with(|| current.clone());
        }
    }

    /// Number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the registry holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl RegistryStore for MemoryRegistry {
    fn lookup(&self, key: &str) -> std::result::Result<Option<String>, ProviderError> {
        Ok(self.keys.get(&key.to_lowercase()).cloned())
    }

    fn subkeys(&self, key: &str) -> std::result::Result<Vec<String>, ProviderError> {
        let (prefix, depth) = if key.is_empty() {
            (String::new(), 0)
        } else {
            (format!("{}\\", key.to_lowercase()), key.split('\\').count())
        };

        // Lowercasing may change byte lengths, so the child name is taken
        // by segment index from the stored spelling.
        Ok(self
            .keys
            .range(prefix.clone()..)
            .take_while(|(lower, _)| lower.starts_with(&prefix))
            .filter(|(lower, _)| !lower[prefix.len()..].contains('\\'))
            .filter_map(|(_, stored)| stored.split('\\').nth(depth).map(str::to_string))
            .collect())
    }
}

/// Provider over a registry key tree.
///
/// # Examples
///
/// ```
/// use provpath::provider::{MemoryRegistry, ProviderAdapter, RegistryProvider};
/// use provpath::ExecutionContext;
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// let provider = RegistryProvider::new(Arc::new(MemoryRegistry::new()));
/// let ctx = ExecutionContext::new(PathBuf::from("/"));
/// assert_eq!(
///     provider.normalize(r"HKLM:\SOFTWARE\X", &ctx).unwrap(),
///     r"HKEY_LOCAL_MACHINE\SOFTWARE\X"
/// );
/// ```
#[derive(Clone)]
pub struct RegistryProvider {
    namespace: String,
    store: Arc<dyn RegistryStore>,
    hives: &'static RegistryHiveMap,
}

impl std::fmt::Debug for RegistryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryProvider")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl RegistryProvider {
    /// Creates a registry provider over `store` in the default namespace.
    #[must_use]
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            store,
            hives: RegistryHiveMap::standard(),
        }
    }

    /// Places the provider in another module namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn lookup(&self, native: &str) -> std::result::Result<Option<ProviderItem>, ProviderError> {
        Ok(self
            .store
            .lookup(native)?
            .map(|stored| ProviderItem::new(stored, ItemKind::Container)))
    }

    fn expand(
        &self,
        native: &str,
        anchor: usize,
    ) -> std::result::Result<Vec<ProviderItem>, ProviderError> {
        let (anchor, pattern) = split_anchor(native, anchor);
        let mut frontier = vec![anchor.to_string()];

        for segment in pattern.split('\\').filter(|s| !s.is_empty()) {
            if has_wildcard(segment) {
                let pattern = WildcardPattern::new(segment)?;
                let mut next = Vec::new();
                for key in &frontier {
                    for name in self.store.subkeys(key)? {
                        if pattern.matches(&name) {
                            next.push(join_key(key, &name));
                        }
                    }
                }
                frontier = next;
            } else {
                for key in &mut frontier {
                    *key = join_key(key, segment);
                }
            }

            if frontier.is_empty() {
                break;
            }
        }

        let mut items = Vec::with_capacity(frontier.len());
        for key in frontier {
            if let Some(item) = self.lookup(&key)? {
                items.push(item);
            }
        }
        log::debug!("expanded {native} to {} key(s)", items.len());
        Ok(items)
    }
}

impl ProviderAdapter for RegistryProvider {
    fn name(&self) -> &str {
        REGISTRY_PROVIDER
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn claims(&self, raw: &str) -> bool {
        let head = raw.split(['\\', '/']).next().unwrap_or_default();
        self.hives.is_drive(head)
    }

    fn base(&self, ctx: &ExecutionContext) -> Option<String> {
        let base = clean_separators(ctx.registry_location()?);
        Some(self.hives.expand(&base).unwrap_or(base))
    }

    fn normalize(&self, raw: &str, ctx: &ExecutionContext) -> Result<String> {
        let cleaned = clean_separators(raw);
        if let Some(expanded) = self.hives.expand(&cleaned) {
            return resolve_key_components(&expanded, raw);
        }

        match ctx.registry_location() {
            Some(location) if !cleaned.is_empty() => {
                let base = clean_separators(location);
                let base = self.hives.expand(&base).unwrap_or(base);
                resolve_key_components(&join_key(&base, &cleaned), raw)
            }
            Some(location) => {
                let base = clean_separators(location);
                Ok(self.hives.expand(&base).unwrap_or(base))
            }
            None => resolve_key_components(&cleaned, raw),
        }
    }

    fn resolve_items(
        &self,
        native: &str,
        query: ItemQuery,
    ) -> std::result::Result<Vec<ProviderItem>, ProviderError> {
        if query.literal || !has_wildcard(split_anchor(native, query.anchor).1) {
            return Ok(self.lookup(native)?.into_iter().collect());
        }
        self.expand(native, query.anchor)
    }

    fn is_container(&self, native: &str) -> std::result::Result<Option<bool>, ProviderError> {
        Ok(self.store.lookup(native)?.map(|_| true))
    }

    fn parse_leaf(&self, native: &str) -> String {
        native.rsplit('\\').next().unwrap_or(native).to_string()
    }
}

/// Converts `/` to `\` and drops empty segments.
fn clean_separators(raw: &str) -> String {
    raw.trim()
        .split(['\\', '/'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}

fn join_key(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}\\{child}")
    }
}

fn resolve_key_components(key: &str, raw: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in key.split('\\') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::InvalidPath {
                        path: raw.to_string(),
                        reason: "key path contains too many '..' components".to_string(),
                    });
                }
            }
            other => segments.push(other),
        }
    }
    Ok(segments.join("\\"))
}
