//! Locating and parsing configuration files.
//!
//! Two files are discovered automatically: the per-user file under
//! `~/.provpath/` and the nearest `provpath.yaml` above the working
//! directory. A third can be named explicitly by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// File name of project configuration files.
pub const PROJECT_CONFIG_FILE: &str = "provpath.yaml";

/// File name of the user configuration file inside its directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Precedence of the user configuration file.
pub const USER_PRECEDENCE: u8 = 1;
/// Precedence of the discovered project file.
pub const PROJECT_PRECEDENCE: u8 = 2;
/// Precedence of a file named explicitly by the caller.
pub const EXPLICIT_PRECEDENCE: u8 = 3;

/// A parsed configuration file and where it ranks.
///
/// # Examples
///
/// ```
/// use provpath::config::loader::USER_PRECEDENCE;
/// use provpath::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: PathBuf::from("~/.provpath/config.yaml"),
///     precedence: USER_PRECEDENCE,
///     config: Default::default(),
/// };
/// assert!(source.config.namespace.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File the configuration was read from.
    pub path: PathBuf,
    /// Higher values override lower ones when merged.
    pub precedence: u8,
    /// Parsed contents.
    pub config: Config,
}

impl ConfigSource {
    /// Reads `path` and tags it with `precedence`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: PathBuf, precedence: u8) -> Result<Self> {
        let config = ConfigLoader::load_file(&path)?;
        Ok(Self {
            path,
            precedence,
            config,
        })
    }
}

/// Discovers configuration files.
///
/// # Examples
///
/// ```no_run
/// use provpath::config::ConfigLoader;
/// use std::path::Path;
///
/// for source in ConfigLoader::load_all(Path::new("."), None).unwrap() {
///     println!("{} (precedence {})", source.path.display(), source.precedence);
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every discovered file, lowest precedence first.
    ///
    /// `user_dir` replaces `~/.provpath` as the user configuration directory.
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, user_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let user_file = match user_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => Self::user_config_path()?,
        };

        let mut sources = Vec::with_capacity(2);
        if user_file.is_file() {
            sources.push(ConfigSource::read(user_file, USER_PRECEDENCE)?);
        }
        if let Some(project) = Self::discover_project_config(working_dir)? {
            sources.push(project);
        }
        Ok(sources)
    }

    /// Finds the `provpath.yaml` closest to `start_dir`, searching upwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the file found cannot be read or parsed.
    pub fn discover_project_config(start_dir: &Path) -> Result<Option<ConfigSource>> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
            .map(|found| ConfigSource::read(found, PROJECT_PRECEDENCE))
            .transpose()
    }

    /// Parses one YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read and
    /// [`Error::Validation`] (naming the file) if its contents do not match
    /// the schema.
    pub fn load_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.display().to_string(),
            reason: format!("cannot read configuration file: {e}"),
        })?;

        serde_yaml::from_str(&text).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// `~/.provpath/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_config_path() -> Result<PathBuf> {
        home::home_dir()
            .map(|home| home.join(".provpath").join(USER_CONFIG_FILE))
            .ok_or_else(|| Error::InvalidPath {
                path: "~".to_string(),
                reason: "cannot determine home directory".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_invalid_path() {
        let err = ConfigLoader::load_file(Path::new("/nonexistent/provpath/config.yaml")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidPath);
    }

    #[test]
    fn test_malformed_yaml_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "namespace: [unclosed").unwrap();

        match ConfigLoader::load_file(&path).unwrap_err() {
            Error::Validation { field, .. } => assert!(field.ends_with("bad.yaml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(USER_CONFIG_FILE);
        fs::write(&path, "namespace: Acme.Tools\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.namespace.as_deref(), Some("Acme.Tools"));
    }

    #[test]
    fn test_discover_none() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigLoader::discover_project_config(dir.path())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_discover_nearest_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "namespace: Outer\n").unwrap();
        fs::write(dir.path().join("a").join(PROJECT_CONFIG_FILE), "namespace: Inner\n").unwrap();

        let found = ConfigLoader::discover_project_config(&nested).unwrap().unwrap();
        assert_eq!(found.precedence, PROJECT_PRECEDENCE);
        assert_eq!(found.config.namespace.as_deref(), Some("Inner"));
    }

    #[test]
    fn test_load_all_orders_user_before_project() {
        let user_dir = TempDir::new().unwrap();
        let project_dir = TempDir::new().unwrap();
        fs::write(user_dir.path().join(USER_CONFIG_FILE), "force: false\n").unwrap();
        fs::write(project_dir.path().join(PROJECT_CONFIG_FILE), "force: true\n").unwrap();

        let sources = ConfigLoader::load_all(project_dir.path(), Some(user_dir.path())).unwrap();
        let ranks: Vec<u8> = sources.iter().map(|s| s.precedence).collect();
        assert_eq!(ranks, vec![USER_PRECEDENCE, PROJECT_PRECEDENCE]);
    }

    #[test]
    fn test_load_all_skips_missing_user_file() {
        let user_dir = TempDir::new().unwrap();
        let project_dir = TempDir::new().unwrap();

        let sources = ConfigLoader::load_all(project_dir.path(), Some(user_dir.path())).unwrap();
        assert!(sources.is_empty());
    }
}
