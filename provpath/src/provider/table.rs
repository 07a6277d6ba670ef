use std::fmt;
use std::sync::Arc;

use super::{
    FileSystemProvider, MemoryRegistry, ProviderAdapter, RegistryProvider, RegistryStore,
};
use crate::error::{Error, Result};

/// The set of registered provider adapters.
///
/// Lookups by name are case-insensitive. One adapter is the default and
/// receives unqualified input that no other provider claims.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    default: usize,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .field("default", &self.default_provider().name())
            .finish()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ProviderRegistry {
    /// Creates a table holding only `default`.
    #[must_use]
    pub fn new(default: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            providers: vec![default],
            default: 0,
        }
    }

    /// The built-in table: filesystem (default) and an empty in-memory registry.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::with_registry_store(Arc::new(MemoryRegistry::new()))
    }

    /// The built-in table with the registry provider backed by `store`.
    #[must_use]
    pub fn with_registry_store(store: Arc<dyn RegistryStore>) -> Self {
        Self::new(Arc::new(FileSystemProvider::new()))
            .register(Arc::new(RegistryProvider::new(store)))
    }

    /// The built-in table with both providers placed in `namespace`.
    #[must_use]
    pub fn with_namespace(namespace: &str, store: Arc<dyn RegistryStore>) -> Self {
        Self::new(Arc::new(FileSystemProvider::new().with_namespace(namespace)))
            .register(Arc::new(RegistryProvider::new(store).with_namespace(namespace)))
    }

    /// Adds `provider`, replacing any adapter registered under the same name.
    #[must_use]
    pub fn register(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        match self.position(provider.name()) {
            Some(index) => self.providers[index] = provider,
            None => self.providers.push(provider),
        }
        self
    }

    /// Makes the adapter named `name` the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderNotFound`] if no such adapter is registered.
    pub fn with_default(mut self, name: &str) -> Result<Self> {
        self.default = self.position(name).ok_or_else(|| Error::ProviderNotFound {
            name: name.to_string(),
        })?;
        Ok(self)
    }

    /// Looks up an adapter by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderNotFound`] if no such adapter is registered.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn ProviderAdapter>> {
        self.position(name)
            .map(|index| &self.providers[index])
            .ok_or_else(|| Error::ProviderNotFound {
                name: name.to_string(),
            })
    }

    /// The adapter used for unqualified, unclaimed input.
    #[must_use]
    pub fn default_provider(&self) -> &Arc<dyn ProviderAdapter> {
        &self.providers[self.default]
    }

    /// The adapter for unqualified `raw` input.
    ///
    /// Non-default adapters are consulted in registration order; the first
    /// that claims the input wins. Otherwise the default adapter is used.
    #[must_use]
    pub fn provider_for(&self, raw: &str) -> &Arc<dyn ProviderAdapter> {
        self.providers
            .iter()
            .enumerate()
            .find(|(index, provider)| *index != self.default && provider.claims(raw))
            .map_or_else(|| self.default_provider(), |(_, provider)| provider)
    }

    /// Registered provider names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Iterates over the registered adapters.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ProviderAdapter>> {
        self.providers.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.providers
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))
    }
}
