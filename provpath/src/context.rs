//! Explicit execution context.
//!
//! Everything the engine would otherwise read from ambient process state
//! (current location, process bitness) is carried here and passed in at
//! construction time.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Per-call execution context.
///
/// # Examples
///
/// ```
/// use provpath::ExecutionContext;
/// use std::path::PathBuf;
///
/// let ctx = ExecutionContext::new(PathBuf::from("/srv/app"))
///     .with_registry_location(r"HKEY_LOCAL_MACHINE\SOFTWARE")
///     .with_64bit_process(true);
/// assert!(ctx.is_64bit_process());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    location: PathBuf,
    registry_location: Option<String>,
    is_64bit_process: bool,
}

impl ExecutionContext {
    /// Creates a context rooted at `location` for filesystem lookups.
    ///
    /// The 64-bit flag defaults to the pointer width of the running binary.
    #[must_use]
    pub fn new(location: PathBuf) -> Self {
        Self {
            location,
            registry_location: None,
            is_64bit_process: cfg!(target_pointer_width = "64"),
        }
    }

    /// Creates a context rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(env::current_dir()?))
    }

    /// Sets the location relative registry keys are resolved against.
    #[must_use]
    pub fn with_registry_location(mut self, location: impl Into<String>) -> Self {
        self.registry_location = Some(location.into());
        self
    }

    /// Overrides the process bitness.
    #[must_use]
    pub fn with_64bit_process(mut self, is_64bit: bool) -> Self {
        self.is_64bit_process = is_64bit;
        self
    }

    /// Current filesystem location.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Current registry location, if one was set.
    #[must_use]
    pub fn registry_location(&self) -> Option<&str> {
        self.registry_location.as_deref()
    }

    /// Whether the host runs as a 64-bit process.
    #[must_use]
    pub fn is_64bit_process(&self) -> bool {
        self.is_64bit_process
    }
}
