//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate the user configuration
//! - Fixture helpers for files and registry snapshots

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads, cleared for every test command.
const PROVPATH_VARS: &[&str] = &[
    "PROVPATH_CONFIG",
    "PROVPATH_NAMESPACE",
    "PROVPATH_DEFAULT_PROVIDER",
    "PROVPATH_LOCATION",
    "PROVPATH_REGISTRY_LOCATION",
    "PROVPATH_REGISTRY_SNAPSHOT",
    "PROVPATH_FORCE",
    "PROVPATH_USE_32BIT_VIEW",
    "PROVPATH_BATCH_POLICY",
    "PROVPATH_OUTPUT_FORMAT",
    "PROVPATH_LOG_MODE",
    "PROVPATH_EXCLUDE",
];

/// Test environment with an isolated working and home directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a bare command builder.
    ///
    /// The command runs inside the temp directory with `HOME` pointed at it
    /// and every `PROVPATH_*` variable removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("provpath").expect("Failed to find provpath binary");
        cmd.current_dir(&self.temp_path).env("HOME", &self.temp_path);
        for var in PROVPATH_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with `--location` set to the temp directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--location").arg(&self.temp_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create an empty file (and its parents) in the test environment.
    pub fn create_file(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, "").expect("Failed to create test file");
        path
    }

    /// Write a file with the given contents.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write a registry snapshot holding `keys` and return its path.
    pub fn write_registry(&self, keys: &[&str]) -> PathBuf {
        let mut yaml = String::from("keys:\n");
        for key in keys {
            yaml.push_str(&format!("  - '{key}'\n"));
        }
        self.write_file("registry.yaml", &yaml)
    }

    /// Native form of a path under the temp directory.
    pub fn native(&self, name: &str) -> String {
        self.temp_path.join(name).display().to_string()
    }
}
