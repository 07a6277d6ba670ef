//! Path resolution.
//!
//! The [`Resolver`] takes raw path specs, qualifies each one, asks the owning
//! provider for matching items and applies the existence policy:
//!
//! | mode     | items found | `include_non_existent` | result                  |
//! |----------|-------------|------------------------|-------------------------|
//! | literal  | none        | false                  | [`Error::PathNotFound`] |
//! | literal  | none        | true                   | one synthesized item    |
//! | wildcard | none        | false                  | empty, info logged      |
//! | wildcard | none        | true                   | synthesized only if the pattern has no metacharacters |
//!
//! Items are returned in the provider's enumeration order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::error::{Error, Result};
use crate::filter::{project, FilterOptions};
use crate::logging::{LogRecord, LogSink};
use crate::provider::wildcard::{has_wildcard, split_anchor};
use crate::provider::{ItemKind, ItemQuery, ProviderAdapter, ProviderError, ProviderRegistry};
use crate::qualify::{PathQualifier, QualifiedPath};

/// One raw path to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Taken verbatim; wildcard characters are ordinary characters.
    Literal(String),
    /// Wildcard metacharacters are expanded.
    Wildcard(String),
}

impl PathSpec {
    /// A literal spec.
    #[must_use]
    pub fn literal(path: impl Into<String>) -> Self {
        Self::Literal(path.into())
    }

    /// A wildcard spec.
    #[must_use]
    pub fn wildcard(pattern: impl Into<String>) -> Self {
        Self::Wildcard(pattern.into())
    }

    /// The raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Wildcard(s) => s,
        }
    }

    /// Whether this spec is in literal mode.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// What to do when one spec in a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPolicy {
    /// Abort the whole call on the first hard error.
    #[default]
    #[serde(rename = "fail-fast")]
    FailFast,
    /// Log each failure as a warning and continue with the next spec.
    #[serde(rename = "continue")]
    ContinueOnError,
}

impl BatchPolicy {
    /// Parses `fail-fast` or `continue` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::BatchPolicy;
    ///
    /// assert_eq!(BatchPolicy::parse("Continue").unwrap(), BatchPolicy::ContinueOnError);
    /// assert!(BatchPolicy::parse("retry").is_err());
    /// ```
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fail-fast" => Ok(Self::FailFast),
            "continue" => Ok(Self::ContinueOnError),
            _ => Err(format!("invalid batch policy: {s}")),
        }
    }
}

impl fmt::Display for BatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::ContinueOnError => write!(f, "continue"),
        }
    }
}

/// Options for a resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Restrict resolution to the named provider.
    pub provider: Option<String>,
    /// Include hidden or system items in wildcard expansion.
    pub force: bool,
    /// Synthesize items for paths that do not exist.
    pub include_non_existent: bool,
    /// Emit native paths instead of qualified ones.
    pub as_native_path: bool,
    /// Failure handling across specs.
    pub batch_policy: BatchPolicy,
}

impl ResolveOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts resolution to `provider`.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the force flag.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Sets whether non-existent paths are synthesized.
    #[must_use]
    pub fn with_include_non_existent(mut self, include: bool) -> Self {
        self.include_non_existent = include;
        self
    }

    /// Sets native output projection.
    #[must_use]
    pub fn with_native_paths(mut self, native: bool) -> Self {
        self.as_native_path = native;
        self
    }

    /// Sets the batch policy.
    #[must_use]
    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }
}

/// Whether a resolved item was found or made up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Existence {
    /// The provider reported the item.
    Exists,
    /// The item was synthesized for a non-existent path.
    Synthesized,
}

/// One result of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedItem {
    /// The qualified path of the item.
    pub path: QualifiedPath,
    /// Whether the item exists.
    pub existence: Existence,
    /// Container, leaf or unknown.
    pub kind: ItemKind,
    /// The last path component, used by name filters.
    pub leaf: String,
}

impl ResolvedItem {
    /// Whether the provider reported the item.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.existence == Existence::Exists
    }

    /// The provider-native path.
    #[must_use]
    pub fn native(&self) -> &str {
        self.path.native()
    }

    /// The output form of this item.
    #[must_use]
    pub fn render(&self, as_native: bool) -> String {
        if as_native {
            self.native().to_string()
        } else {
            self.path.to_string()
        }
    }
}

/// Resolves raw path specs against a provider table.
///
/// # Examples
///
/// ```
/// use provpath::logging::NullSink;
/// use provpath::{ExecutionContext, PathSpec, ProviderRegistry, ResolveOptions, Resolver};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a.txt"), "").unwrap();
/// std::fs::write(dir.path().join("b.txt"), "").unwrap();
///
/// let providers = ProviderRegistry::with_defaults();
/// let ctx = ExecutionContext::new(dir.path().to_path_buf());
/// let resolver = Resolver::new(&providers, &ctx, &NullSink);
///
/// let items = resolver
///     .resolve(&[PathSpec::wildcard("*.txt")], &ResolveOptions::new())
///     .unwrap();
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].leaf, "a.txt");
/// ```
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    qualifier: PathQualifier<'a>,
    sink: &'a dyn LogSink,
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("qualifier", &self.qualifier)
            .finish_non_exhaustive()
    }
}

impl<'a> Resolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub fn new(
        providers: &'a ProviderRegistry,
        ctx: &'a ExecutionContext,
        sink: &'a dyn LogSink,
    ) -> Self {
        Self {
            qualifier: PathQualifier::new(providers, ctx),
            sink,
        }
    }

    /// The qualifier used for each spec.
    #[must_use]
    pub fn qualifier(&self) -> &PathQualifier<'a> {
        &self.qualifier
    }

    /// The sink diagnostics are written to.
    #[must_use]
    pub fn sink(&self) -> &'a dyn LogSink {
        self.sink
    }

    /// Resolves every spec in order and concatenates the results.
    ///
    /// # Errors
    ///
    /// With [`BatchPolicy::FailFast`], returns the first hard error. With
    /// [`BatchPolicy::ContinueOnError`], failed specs are logged and skipped
    /// and this never fails.
    pub fn resolve(&self, specs: &[PathSpec], opts: &ResolveOptions) -> Result<Vec<ResolvedItem>> {
        let mut resolved = Vec::new();

        for spec in specs {
            match self.resolve_spec(spec, opts) {
                Ok(items) => resolved.extend(items),
                Err(e) if opts.batch_policy == BatchPolicy::ContinueOnError => {
                    let kind = e.kind();
                    self.sink.record(
                        LogRecord::warning(format!(
                            "skipping '{}': {e}. {}",
                            spec.as_str(),
                            e.recommended_action()
                        ))
                        .with_kind(kind),
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(resolved)
    }

    /// Resolves, filters and projects to output strings in one pass.
    ///
    /// Filter patterns are compiled before any provider is queried.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter pattern is invalid or resolution fails.
    pub fn resolve_paths(
        &self,
        specs: &[PathSpec],
        opts: &ResolveOptions,
        filter: &FilterOptions,
    ) -> Result<Vec<String>> {
        let filter = filter.compile()?;
        let items = filter.apply(self.resolve(specs, opts)?);
        Ok(project(&items, opts.as_native_path))
    }

    /// Resolves a single spec.
    ///
    /// # Errors
    ///
    /// - qualification errors ([`Error::ProviderNotFound`], [`Error::ProviderMismatch`],
    ///   [`Error::InvalidPath`])
    /// - [`Error::PathNotFound`] for a literal spec that matched nothing
    /// - [`Error::InvalidPattern`] for a malformed wildcard
    /// - [`Error::ResolutionError`] if the provider fails
    pub fn resolve_spec(&self, spec: &PathSpec, opts: &ResolveOptions) -> Result<Vec<ResolvedItem>> {
        let qualified = self
            .qualifier
            .qualify(spec.as_str(), opts.provider.as_deref())?;
        let provider = self.qualifier.providers().get(qualified.provider())?;

        let anchor = provider
            .base(self.qualifier.context())
            .map_or(0, |base| anchored_len(qualified.native(), &base));
        let query = ItemQuery {
            literal: spec.is_literal(),
            force: opts.force,
            anchor,
        };
        let items = provider
            .resolve_items(qualified.native(), query)
            .map_err(|source| lookup_error(&qualified, source))?;

        if !items.is_empty() {
            log::debug!("{} matched {} item(s)", qualified, items.len());
            return Ok(items
                .into_iter()
                .map(|item| ResolvedItem {
                    leaf: provider.parse_leaf(&item.native),
                    path: QualifiedPath::new(provider.namespace(), provider.name(), item.native),
                    existence: Existence::Exists,
                    kind: item.kind,
                })
                .collect());
        }

        let pattern_free =
            spec.is_literal() || !has_wildcard(split_anchor(qualified.native(), anchor).1);
        if opts.include_non_existent && pattern_free {
            return Ok(vec![synthesize(provider.as_ref(), qualified)]);
        }
        if spec.is_literal() {
            return Err(Error::PathNotFound {
                path: qualified.to_string(),
            });
        }

        self.sink.info(&format!("no items match {qualified}"));
        Ok(Vec::new())
    }
}

/// Length of `base` when `native` lies at or below it, otherwise zero.
fn anchored_len(native: &str, base: &str) -> usize {
    let Some(rest) = native.strip_prefix(base) else {
        return 0;
    };
    let at_boundary = rest.is_empty()
        || rest.starts_with(['/', '\\'])
        || base.ends_with(['/', '\\']);
    if at_boundary {
        base.len()
    } else {
        0
    }
}

fn synthesize(provider: &dyn ProviderAdapter, path: QualifiedPath) -> ResolvedItem {
    ResolvedItem {
        leaf: provider.parse_leaf(path.native()),
        path,
        existence: Existence::Synthesized,
        kind: ItemKind::Unknown,
    }
}

fn lookup_error(path: &QualifiedPath, source: ProviderError) -> Error {
    match source {
        ProviderError::InvalidPattern { pattern, reason } => Error::InvalidPattern { pattern, reason },
        source => Error::ResolutionError {
            path: path.to_string(),
            source,
        },
    }
}
