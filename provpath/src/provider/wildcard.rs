//! Wildcard detection and matching for path segments and leaf names.
//!
//! Patterns follow shell conventions and are matched case-insensitively:
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]` and `[!abc]` match character classes
//!
//! A pattern is matched against a single segment, never across separators.

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;

use super::ProviderError;
use crate::error::Error;

/// Characters that make a segment a wildcard pattern.
pub const WILDCARD_METACHARACTERS: [char; 3] = ['*', '?', '['];

/// A pattern that could not be compiled.
#[derive(Debug, Clone, Error)]
#[error("invalid pattern '{pattern}': {reason}")]
pub struct PatternError {
    /// The pattern text.
    pub pattern: String,
    /// Why it was rejected.
    pub reason: String,
}

impl From<PatternError> for ProviderError {
    fn from(err: PatternError) -> Self {
        Self::InvalidPattern {
            pattern: err.pattern,
            reason: err.reason,
        }
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Self::InvalidPattern {
            pattern: err.pattern,
            reason: err.reason,
        }
    }
}

/// Returns true if `s` contains any wildcard metacharacter.
///
/// # Examples
///
/// ```
/// use provpath::provider::wildcard::has_wildcard;
///
/// assert!(has_wildcard("*.txt"));
/// assert!(has_wildcard(r"HKEY_LOCAL_MACHINE\SOFTWARE\Micro?oft"));
/// assert!(has_wildcard("log[0-9]"));
/// assert!(!has_wildcard("/var/log/syslog"));
/// ```
#[must_use]
pub fn has_wildcard(s: &str) -> bool {
    s.contains(WILDCARD_METACHARACTERS)
}

/// Splits `native` at `anchor` into the literal context part and the part
/// that may hold patterns. Separators between the two are dropped.
///
/// An anchor past the end or off a character boundary yields no literal part.
///
/// ```
/// use provpath::provider::wildcard::split_anchor;
///
/// assert_eq!(split_anchor("/srv/b[1]/*.txt", 9), ("/srv/b[1]", "*.txt"));
/// assert_eq!(split_anchor("/srv/*.txt", 0), ("", "/srv/*.txt"));
/// ```
#[must_use]
pub fn split_anchor(native: &str, anchor: usize) -> (&str, &str) {
    match (native.get(..anchor), native.get(anchor..)) {
        (Some(head), Some(tail)) => (head, tail.trim_start_matches(['/', '\\'])),
        _ => ("", native),
    }
}

/// A compiled, case-insensitive single-segment pattern.
///
/// # Examples
///
/// ```
/// use provpath::provider::wildcard::WildcardPattern;
///
/// let pattern = WildcardPattern::new("*.TXT").unwrap();
/// assert!(pattern.matches("notes.txt"));
/// assert!(!pattern.matches("notes.log"));
/// ```
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    text: String,
    matcher: GlobMatcher,
}

impl WildcardPattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern syntax is invalid, e.g. an unclosed
    /// character class.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .backslash_escape(false)
            .build()
            .map_err(|e| PatternError {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            text: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Whether `name` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }

    /// The source text of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the pattern explicitly asks for dot-prefixed names.
    #[must_use]
    pub fn targets_hidden(&self) -> bool {
        self.text.starts_with('.')
    }
}
