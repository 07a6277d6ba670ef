//! Renders man pages into `$OUT_DIR/man` with clap_mangen.
//!
//! Build scripts cannot use the crate they build, so the command tree is
//! restated here. Keep it in step with `src/cli.rs`.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Subcommand name, man page title and summary.
const SUBCOMMANDS: &[(&str, &str, &str)] = &[
    ("resolve", "provpath-resolve", "Resolve paths or wildcard patterns to qualified paths"),
    ("qualify", "provpath-qualify", "Print the qualified form of a path without looking it up"),
    (
        "convert-registry",
        "provpath-convert-registry",
        "Convert a registry key to its canonical qualified form",
    ),
    ("providers", "provpath-providers", "List registered providers"),
    ("validate", "provpath-validate", "Validate a configuration file"),
    ("completions", "provpath-completions", "Generate shell completion scripts"),
];

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .global(true)
        .action(ArgAction::SetTrue)
}

fn option(name: &'static str, value: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name(value)
        .global(true)
}

fn command_tree() -> Command {
    Command::new("provpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve and qualify provider-scoped paths")
        .long_about(
            "Expands filesystem and registry paths through the provider that owns \
             them and prints provider-qualified or native paths.",
        )
        .arg(flag("verbose", "Enable verbose output"))
        .arg(flag("quiet", "Suppress non-essential output"))
        .arg(
            option("config", "PATH", "Extra configuration file")
                .env("PROVPATH_CONFIG"),
        )
        .arg(option("location", "PATH", "Base for relative filesystem paths"))
        .arg(option("registry-file", "PATH", "YAML registry snapshot"))
        .arg(option("format", "FORMAT", "Output format (lines or json)"))
        .subcommands(
            SUBCOMMANDS
                .iter()
                .map(|(name, _, about)| Command::new(*name).about(*about)),
        )
}

fn render(command: Command, dir: &Path, file: &str) -> io::Result<()> {
    let mut page = Vec::new();
    Man::new(command).render(&mut page)?;
    fs::write(dir.join(file), page)
}

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    for (_, title, about) in SUBCOMMANDS {
        render(
            Command::new(*title).about(*about),
            &man_dir,
            &format!("{title}.1"),
        )?;
    }
    render(command_tree(), &man_dir, "provpath.1")?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
