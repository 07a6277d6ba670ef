//! Output formatting for resolved paths.
//!
//! Results can be printed one path per line, or as a JSON array carrying
//! the provider, kind and existence of every item.

mod formatters;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolver::ResolvedItem;

pub use formatters::{JsonFormatter, LinesFormatter};

/// Trait for rendering resolved items.
pub trait OutputFormatter {
    /// Render `items`, using native paths if `as_native` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, items: &[ResolvedItem], as_native: bool) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One path per line.
    #[default]
    Lines,
    /// A JSON array of item records.
    Json,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Lines => Box::new(LinesFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines => write!(f, "lines"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "json" => Ok(Self::Json),
            _ => Err(Error::Validation {
                field: "output_format".to_string(),
                message: format!("expected lines or json, got '{s}'"),
            }),
        }
    }
}
