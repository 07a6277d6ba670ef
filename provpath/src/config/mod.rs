//! Layered settings for provpath.
//!
//! A [`Config`] is assembled from several layers, later layers winning over
//! earlier ones field by field:
//!
//! | layer | source |
//! |-------|--------|
//! | user | `~/.provpath/config.yaml` |
//! | project | nearest `provpath.yaml` above the working directory |
//! | explicit | file passed to [`ConfigBuilder::with_config_file`] |
//! | environment | `PROVPATH_*` variables |
//! | overrides | [`ConfigBuilder::with_config`] |
//!
//! Anything still unset after merging falls back to the built-in value
//! through the `effective_*` accessors on [`Config`]. The merged result is
//! checked by [`ConfigValidator`] before it is returned.
//!
//! ```
//! use provpath::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         namespace: Some("Acme.Tools".to_string()),
//!         default_provider: Some("Registry".to_string()),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.effective_namespace(), "Acme.Tools");
//! let providers = config.provider_table().unwrap();
//! assert_eq!(providers.default_provider().name(), "Registry");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::Config;
pub use validator::ConfigValidator;
