#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # provpath
//!
//! Provider-scoped path resolution.
//!
//! This library maps user-supplied path expressions (literal paths, wildcard
//! patterns or already provider-qualified paths) to fully qualified paths of
//! the form `Namespace\Provider::NativePath`, and converts registry key
//! spellings to their canonical form.
//!
//! ## Core Types
//!
//! - [`ProviderRegistry`] and [`provider::ProviderAdapter`]: the provider table
//! - [`PathQualifier`] and [`QualifiedPath`]: qualification
//! - [`Resolver`], [`PathSpec`] and [`ResolveOptions`]: resolution
//! - [`FilterOptions`]: post-resolution filtering
//! - [`RegistryPathConverter`]: registry key conversion
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use provpath::logging::NullSink;
//! use provpath::{ExecutionContext, PathSpec, ProviderRegistry, ResolveOptions, Resolver};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("notes.txt"), "").unwrap();
//!
//! let providers = ProviderRegistry::with_defaults();
//! let ctx = ExecutionContext::new(dir.path().to_path_buf());
//! let resolver = Resolver::new(&providers, &ctx, &NullSink);
//!
//! let items = resolver
//!     .resolve(&[PathSpec::literal("notes.txt")], &ResolveOptions::new())
//!     .unwrap();
//! assert!(items[0].path.to_string().starts_with(r"Provpath.Core\FileSystem::"));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod hive;
pub mod logging;
pub mod output;
pub mod provider;
pub mod qualify;
pub mod registry_path;
pub mod resolver;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use context::ExecutionContext;
pub use error::{Error, ErrorKind, Result};
pub use filter::{FilterOptions, PathType};
pub use hive::RegistryHiveMap;
pub use logging::{init_logger, LogLevel, LogSink, Logger};
pub use output::OutputFormat;
pub use provider::ProviderRegistry;
pub use qualify::{PathQualifier, QualifiedPath};
pub use registry_path::RegistryPathConverter;
pub use resolver::{BatchPolicy, Existence, PathSpec, ResolveOptions, ResolvedItem, Resolver};
