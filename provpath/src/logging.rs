//! Diagnostics plumbing.
//!
//! The engine never writes to a process-wide log on its own. Diagnostics are
//! handed to an injected [`LogSink`]; the stderr [`Logger`] is one such sink,
//! [`RecordingSink`] buffers records for tests and embedding hosts.

use std::env;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::ErrorKind;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "PROVPATH_LOG_MODE";

/// How chatty stderr output is.
///
/// # Examples
///
/// ```
/// use provpath::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing on stderr.
    Quiet,
    /// Warnings and errors.
    Normal,
    /// Everything, including `log::debug!` output.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        })
    }
}

impl LogLevel {
    /// Parses `quiet`, `normal` or `verbose`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use provpath::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        [Self::Quiet, Self::Normal, Self::Verbose]
            .into_iter()
            .find(|level| level.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown log mode '{s}' (expected quiet, normal or verbose)"))
    }
}

/// Severity of a diagnostic record emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational note (e.g. a wildcard that matched nothing).
    Info,
    /// Something the caller probably wants to know about.
    Warning,
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// How important the record is.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// The condition that produced the record, when it maps to one.
    pub kind: Option<ErrorKind>,
}

impl LogRecord {
    /// Creates an informational record.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            kind: None,
        }
    }

    /// Creates a warning record.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            kind: None,
        }
    }

    /// Tags the record with the condition that produced it.
    #[must_use]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Destination for engine diagnostics.
///
/// Implementations must not panic; `record` has no error channel so a failing
/// sink can never abort a resolution.
pub trait LogSink: Send + Sync {
    /// Accepts one record.
    fn record(&self, record: LogRecord);

    /// Emits an informational message.
    fn info(&self, message: &str) {
        self.record(LogRecord::info(message));
    }

    /// Emits a warning message.
    fn warn(&self, message: &str) {
        self.record(LogRecord::warning(message));
    }
}

/// A sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&self, _record: LogRecord) {}
}

/// A sink that keeps every record in memory.
///
/// # Examples
///
/// ```
/// use provpath::logging::{LogSink, RecordingSink, Severity};
///
/// let sink = RecordingSink::new();
/// sink.warn("careful");
/// let records = sink.records();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].severity, Severity::Warning);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all records received so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogSink for RecordingSink {
    fn record(&self, record: LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

/// Writes diagnostics to stderr, filtered by a [`LogLevel`].
///
/// At `Normal` only warnings and errors get through; `Verbose` adds info and
/// debug lines. `Quiet` silences everything.
///
/// ```
/// use provpath::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.shows(LogLevel::Normal));
/// assert!(!logger.shows(LogLevel::Verbose));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger that prints at `level` and below.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The level this logger was created with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether a line needing `required` is printed.
    #[must_use]
    pub fn shows(&self, required: LogLevel) -> bool {
        self.level != LogLevel::Quiet && self.level >= required
    }

    fn emit(&self, required: LogLevel, tag: &str, message: &str) {
        if self.shows(required) {
            eprintln!("{tag}: {message}");
        }
    }

    /// Prints `message` as an error.
    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Normal, "error", message);
    }

    /// Prints `message` as a warning.
    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Normal, "warning", message);
    }

    /// Prints `message` in verbose mode.
    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Verbose, "info", message);
    }

    /// Prints `message` in verbose mode.
    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Verbose, "debug", message);
    }

    /// Routes the `log` facade through this logger so library `log::debug!`
    /// output appears in verbose mode.
    ///
    /// Only the first call in a process has any effect.
    pub fn install(self) {
        let max = match self.level {
            LogLevel::Quiet => log::LevelFilter::Off,
            LogLevel::Normal => log::LevelFilter::Warn,
            LogLevel::Verbose => log::LevelFilter::Debug,
        };
        if log::set_boxed_logger(Box::new(self)).is_ok() {
            log::set_max_level(max);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl LogSink for Logger {
    fn record(&self, record: LogRecord) {
        let text = match record.kind {
            Some(kind) => format!("[{kind}] {}", record.message),
            None => record.message,
        };
        match record.severity {
            Severity::Info => self.info(&text),
            Severity::Warning => self.warn(&text),
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        match metadata.level() {
            log::Level::Error | log::Level::Warn => self.shows(LogLevel::Normal),
            log::Level::Info | log::Level::Debug => self.shows(LogLevel::Verbose),
            log::Level::Trace => false,
        }
    }

    fn log(&self, record: &log::Record<'_>) {
        if !log::Log::enabled(self, record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        match record.level() {
            log::Level::Error => self.error(&message),
            log::Level::Warn => self.warn(&message),
            log::Level::Info => self.info(&message),
            log::Level::Debug | log::Level::Trace => self.debug(&message),
        }
    }

    fn flush(&self) {}
}

/// Picks the logger level for a run.
///
/// `--verbose` beats `--quiet`, either flag beats `PROVPATH_LOG_MODE`, and an
/// unset or unparsable variable means `Normal`.
///
/// ```
/// use provpath::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = if verbose {
        LogLevel::Verbose
    } else if quiet {
        LogLevel::Quiet
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| LogLevel::parse(&mode).ok())
            .unwrap_or(LogLevel::Normal)
    };
    Logger::new(level)
}
