//! `provpath` binary.

use clap::Parser;
use provpath_cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            // Codes are small positive integers, see CliError::exit_code.
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
