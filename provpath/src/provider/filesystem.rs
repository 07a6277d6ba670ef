//! The filesystem provider.
//!
//! Native paths are absolute platform paths. Wildcards are expanded one
//! segment at a time; entries within a directory are visited in sorted name
//! order so repeated calls over the same tree return the same sequence.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::normalize;
use super::wildcard::{has_wildcard, split_anchor, WildcardPattern};
use super::{
    ItemKind, ItemQuery, ProviderAdapter, ProviderError, ProviderItem, DEFAULT_NAMESPACE,
    FILESYSTEM_PROVIDER,
};
use crate::context::ExecutionContext;
use crate::error::Result;

/// Provider over the local filesystem.
///
/// # Examples
///
/// ```
/// use provpath::provider::{FileSystemProvider, ItemQuery, ProviderAdapter};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a.txt"), "").unwrap();
///
/// let provider = FileSystemProvider::new();
/// let pattern = dir.path().join("*.txt");
/// let items = provider
///     .resolve_items(pattern.to_str().unwrap(), ItemQuery::default())
///     .unwrap();
/// assert_eq!(items.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemProvider {
    namespace: String,
}

impl Default for FileSystemProvider {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl FileSystemProvider {
    /// Creates a filesystem provider in the default namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the provider in another module namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn lookup(native: &str) -> std::result::Result<Option<ProviderItem>, ProviderError> {
        match fs::metadata(native) {
            Ok(meta) => Ok(Some(ProviderItem::new(native, kind_of(meta.is_dir())))),
            Err(e) if is_missing(&e) => match fs::symlink_metadata(native) {
                // Dangling symlinks still exist as items.
                Ok(_) => Ok(Some(ProviderItem::new(native, ItemKind::Leaf))),
                Err(_) => Ok(None),
            },
            Err(e) => Err(ProviderError::from_io(native, e)),
        }
    }

    fn expand(
        native: &str,
        query: ItemQuery,
    ) -> std::result::Result<Vec<ProviderItem>, ProviderError> {
        let (anchor, pattern) = split_anchor(native, query.anchor);
        let force = query.force;
        let mut frontier = vec![PathBuf::from(anchor)];

        for component in Path::new(pattern).components() {
            let segment = component.as_os_str().to_str().unwrap_or_default();
            if matches!(component, Component::Normal(_)) && has_wildcard(segment) {
                let pattern = WildcardPattern::new(segment)?;
                let mut next = Vec::new();
                for dir in &frontier {
                    next.extend(Self::matching_children(dir, &pattern, force)?);
                }
                frontier = next;
            } else {
                for candidate in &mut frontier {
                    candidate.push(component.as_os_str());
                }
            }

            if frontier.is_empty() {
                break;
            }
        }

        let mut items = Vec::with_capacity(frontier.len());
        for candidate in frontier {
            let Some(candidate) = candidate.to_str() else {
                continue;
            };
            if let Some(item) = Self::lookup(candidate)? {
                items.push(item);
            }
        }
        log::debug!("expanded {native} to {} item(s)", items.len());
        Ok(items)
    }

    fn matching_children(
        dir: &Path,
        pattern: &WildcardPattern,
        force: bool,
    ) -> std::result::Result<Vec<PathBuf>, ProviderError> {
        let dir_display = dir.display().to_string();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if is_missing(&e) => return Ok(Vec::new()),
            Err(e) => return Err(ProviderError::from_io(&dir_display, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ProviderError::from_io(&dir_display, e))?;
            let Ok(name) = entry.file_name().into_string() else {
                log::debug!("skipping non-UTF-8 entry in {dir_display}");
                continue;
            };
            if !pattern.matches(&name) {
                continue;
            }
            if is_hidden(&name) && !force && !pattern.targets_hidden() {
                continue;
            }
            names.push(name);
        }
        names.sort();

        Ok(names.into_iter().map(|name| dir.join(name)).collect())
    }
}

impl ProviderAdapter for FileSystemProvider {
    fn name(&self) -> &str {
        FILESYSTEM_PROVIDER
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn base(&self, ctx: &ExecutionContext) -> Option<String> {
        normalize::normalize(".", ctx.location()).ok()
    }

    fn normalize(&self, raw: &str, ctx: &ExecutionContext) -> Result<String> {
        normalize::normalize(raw, ctx.location())
    }

    fn resolve_items(
        &self,
        native: &str,
        query: ItemQuery,
    ) -> std::result::Result<Vec<ProviderItem>, ProviderError> {
        if query.literal || !has_wildcard(split_anchor(native, query.anchor).1) {
            return Ok(Self::lookup(native)?.into_iter().collect());
        }
        Self::expand(native, query)
    }

    fn is_container(&self, native: &str) -> std::result::Result<Option<bool>, ProviderError> {
        Ok(Self::lookup(native)?.map(|item| item.kind == ItemKind::Container))
    }

    fn parse_leaf(&self, native: &str) -> String {
        Path::new(native)
            .file_name()
            .map_or_else(|| native.to_string(), |name| name.to_string_lossy().into_owned())
    }
}

fn kind_of(is_dir: bool) -> ItemKind {
    if is_dir {
        ItemKind::Container
    } else {
        ItemKind::Leaf
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn is_missing(err: &io::Error) -> bool {
    // NotADirectory: a path component is a regular file.
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
