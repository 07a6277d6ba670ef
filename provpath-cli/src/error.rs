//! Errors surfaced by the `provpath` binary and their exit codes.

use provpath::Error as LibError;
use thiserror::Error;

/// Anything a subcommand can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failure reported by the resolution engine; printed with its hint.
    #[error("{0}\n{hint}", hint = .0.recommended_action())]
    Library(#[from] LibError),

    /// Flags or operands that make no sense together.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be assembled.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The command ran but the answer is "no", e.g. a declined conversion.
    #[error("{0}")]
    SemanticFailure(String),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 1 | declined or invalid input file |
    /// | 2 | path not found |
    /// | 3 | provider unknown, mismatched or failing |
    /// | 4 | bad arguments, paths or patterns |
    /// | 5 | I/O |
    /// | 7 | configuration |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SemanticFailure(_) => 1,
            Self::InvalidArguments(_) => 4,
            Self::Io(_) => 5,
            Self::Config(_) => 7,
            Self::Library(inner) => library_exit_code(inner),
        }
    }
}

fn library_exit_code(error: &LibError) -> i32 {
    match error {
        LibError::PathNotFound { .. } => 2,
        LibError::ProviderNotFound { .. }
        | LibError::ProviderMismatch { .. }
        | LibError::ResolutionError { .. } => 3,
        LibError::InvalidPath { .. }
        | LibError::InvalidPattern { .. }
        | LibError::Validation { .. } => 4,
        LibError::Io(_) => 5,
        LibError::Configuration(_) => 7,
    }
}
