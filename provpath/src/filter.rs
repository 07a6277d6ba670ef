//! Post-resolution filtering and output projection.
//!
//! Filters narrow a resolved sequence independently and in order:
//! 1. path type (container, leaf or any)
//! 2. `filter`: the leaf must match
//! 3. `exclude`: the leaf must match none of the patterns
//! 4. `include`: the leaf must match at least one pattern
//!
//! Name patterns apply to the leaf only, never to the full path. An empty
//! result is not an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::provider::wildcard::WildcardPattern;
use crate::provider::ItemKind;
use crate::resolver::ResolvedItem;

/// Which item kinds survive filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Everything, including items of unknown kind.
    #[default]
    Any,
    /// Containers only.
    Container,
    /// Leaves only.
    Leaf,
}

impl PathType {
    /// Whether an item of `kind` passes.
    #[must_use]
    pub fn admits(self, kind: ItemKind) -> bool {
        match self {
            Self::Any => true,
            Self::Container => kind == ItemKind::Container,
            Self::Leaf => kind == ItemKind::Leaf,
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Container => write!(f, "container"),
            Self::Leaf => write!(f, "leaf"),
        }
    }
}

impl FromStr for PathType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "container" => Ok(Self::Container),
            "leaf" => Ok(Self::Leaf),
            _ => Err(Error::Validation {
                field: "path_type".to_string(),
                message: format!("expected any, container or leaf, got '{s}'"),
            }),
        }
    }
}

/// Uncompiled filter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Kind restriction.
    pub path_type: PathType,
    /// The leaf must match this pattern.
    pub filter: Option<String>,
    /// Drop leaves matching any of these.
    pub exclude: Vec<String>,
    /// Keep only leaves matching one of these.
    pub include: Vec<String>,
}

impl FilterOptions {
    /// No filtering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kind restriction.
    #[must_use]
    pub fn with_path_type(mut self, path_type: PathType) -> Self {
        self.path_type = path_type;
        self
    }

    /// Sets the single name filter.
    #[must_use]
    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the include patterns.
    #[must_use]
    pub fn with_include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Compiles every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first malformed pattern.
    pub fn compile(&self) -> Result<NameFilter> {
        Ok(NameFilter {
            path_type: self.path_type,
            filter: self
                .filter
                .as_deref()
                .map(WildcardPattern::new)
                .transpose()?,
            exclude: compile_all(&self.exclude)?,
            include: compile_all(&self.include)?,
        })
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<WildcardPattern>> {
    patterns
        .iter()
        .map(|p| WildcardPattern::new(p).map_err(Error::from))
        .collect()
}

/// Compiled filters, ready to apply.
#[derive(Debug, Clone)]
pub struct NameFilter {
    path_type: PathType,
    filter: Option<WildcardPattern>,
    exclude: Vec<WildcardPattern>,
    include: Vec<WildcardPattern>,
}

impl NameFilter {
    /// Whether `item` survives every filter.
    #[must_use]
    pub fn admits(&self, item: &ResolvedItem) -> bool {
        let leaf = item.leaf.as_str();
        self.path_type.admits(item.kind)
            && self.filter.as_ref().is_none_or(|p| p.matches(leaf))
            && !self.exclude.iter().any(|p| p.matches(leaf))
            && (self.include.is_empty() || self.include.iter().any(|p| p.matches(leaf)))
    }

    /// Keeps the items that survive, preserving order.
    #[must_use]
    pub fn apply(&self, items: Vec<ResolvedItem>) -> Vec<ResolvedItem> {
        items.into_iter().filter(|item| self.admits(item)).collect()
    }
}

/// Compiles `opts` and applies it to `items`.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if any pattern is malformed.
///
/// # Examples
///
/// ```
/// use provpath::filter::{filter, FilterOptions};
/// use provpath::provider::ItemKind;
/// use provpath::{Existence, QualifiedPath, ResolvedItem};
///
/// let items: Vec<_> = ["a.txt", "b.txt", "c.log"]
///     .iter()
///     .map(|leaf| ResolvedItem {
///         path: QualifiedPath::new("Provpath.Core", "FileSystem", format!("/d/{leaf}")),
///         existence: Existence::Exists,
///         kind: ItemKind::Leaf,
///         leaf: leaf.to_string(),
///     })
///     .collect();
///
/// let opts = FilterOptions::new().with_include(["*.txt"]).with_exclude(["b.*"]);
/// let kept = filter(items, &opts).unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].leaf, "a.txt");
/// ```
pub fn filter(items: Vec<ResolvedItem>, opts: &FilterOptions) -> Result<Vec<ResolvedItem>> {
    Ok(opts.compile()?.apply(items))
}

/// Renders items as output strings, native or qualified.
#[must_use]
pub fn project(items: &[ResolvedItem], as_native: bool) -> Vec<String> {
    items.iter().map(|item| item.render(as_native)).collect()
}
