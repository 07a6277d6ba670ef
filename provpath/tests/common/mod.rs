//! Common test utilities for integration tests.
//!
//! Fixture builders for filesystem trees and registry snapshots.

use std::fs;
use std::sync::Arc;

use provpath::provider::MemoryRegistry;
use provpath::{ExecutionContext, ProviderRegistry};
use tempfile::TempDir;

/// A temporary directory tree used as the filesystem location.
///
/// Layout:
///
/// ```text
/// .hidden.txt
/// a.txt
/// b.txt
/// c.log
/// docs/
///   guide.md
///   notes.txt
/// src/
///   main.rs
/// ```
pub struct FileTree {
    /// Kept alive for the duration of the test.
    pub dir: TempDir,
}

#[allow(dead_code)]
impl FileTree {
    /// Creates the standard layout.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for file in [".hidden.txt", "a.txt", "b.txt", "c.log"] {
            fs::write(dir.path().join(file), file).expect("Failed to write fixture");
        }
        for (sub, file) in [("docs", "guide.md"), ("docs", "notes.txt"), ("src", "main.rs")] {
            fs::create_dir_all(dir.path().join(sub)).expect("Failed to create fixture dir");
            fs::write(dir.path().join(sub).join(file), file).expect("Failed to write fixture");
        }
        Self { dir }
    }

    /// Native form of `name` under the tree.
    pub fn native(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    /// Execution context rooted at the tree.
    pub fn context(&self) -> ExecutionContext {
        ExecutionContext::new(self.dir.path().to_path_buf())
    }
}

/// A registry snapshot with a small vendor hierarchy.
#[allow(dead_code)]
pub fn registry_store() -> Arc<MemoryRegistry> {
    Arc::new(MemoryRegistry::from_keys([
        r"HKEY_LOCAL_MACHINE\SOFTWARE\Vendor\App",
        r"HKEY_LOCAL_MACHINE\SOFTWARE\Vendor\Tools",
        r"HKEY_LOCAL_MACHINE\SOFTWARE\Other",
        r"HKEY_CURRENT_USER\Software\Vendor\Settings",
    ]))
}

/// The built-in providers with [`registry_store`] behind the registry.
#[allow(dead_code)]
pub fn providers() -> ProviderRegistry {
    ProviderRegistry::with_registry_store(registry_store())
}
