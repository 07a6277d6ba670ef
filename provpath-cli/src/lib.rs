//! Command-line front end for provpath.
//!
//! The binary in `main.rs` only parses arguments and calls [`Cli::run`];
//! everything else lives here so tests and tooling can build the command
//! tree directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
pub use error::CliError;
