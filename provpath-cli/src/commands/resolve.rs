//! Command to resolve paths and wildcard patterns.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use clap::Args;
use provpath::{BatchPolicy, FilterOptions, PathSpec, PathType, ResolveOptions};

/// Resolve paths or wildcard patterns to qualified paths.
#[derive(Args)]
pub struct ResolveCommand {
    /// Paths or patterns to resolve
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Treat every path literally (no wildcard expansion)
    #[arg(long)]
    pub literal: bool,

    /// Resolve through this provider
    #[arg(long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Include hidden items in wildcard expansion
    #[arg(long)]
    pub force: bool,

    /// Emit the qualified form of paths that do not exist
    #[arg(long)]
    pub include_non_existent: bool,

    /// Print provider-native paths instead of qualified paths
    #[arg(long)]
    pub native: bool,

    /// Keep only containers or only leaves
    #[arg(long, value_name = "TYPE", default_value = "any")]
    pub path_type: PathType,

    /// Keep only items whose leaf matches this pattern
    #[arg(long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Drop items whose leaf matches (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Keep only items whose leaf matches one of these (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Log failing paths and keep going
    #[arg(long)]
    pub continue_on_error: bool,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let config = &session.config;

        let literal = self.literal;
        let specs: Vec<PathSpec> = self
            .paths
            .into_iter()
            .map(|p| {
                if literal {
                    PathSpec::literal(p)
                } else {
                    PathSpec::wildcard(p)
                }
            })
            .collect();

        let batch_policy = if self.continue_on_error {
            BatchPolicy::ContinueOnError
        } else {
            config.effective_batch_policy()
        };
        let mut opts = ResolveOptions::new()
            .with_force(self.force || config.force.unwrap_or(false))
            .with_include_non_existent(self.include_non_existent)
            .with_native_paths(self.native)
            .with_batch_policy(batch_policy);
        if let Some(provider) = self.provider {
            opts = opts.with_provider(provider);
        }

        let exclude = config
            .exclude
            .iter()
            .flatten()
            .cloned()
            .chain(self.exclude);
        let mut filter = FilterOptions::new()
            .with_path_type(self.path_type)
            .with_exclude(exclude)
            .with_include(self.include);
        if let Some(pattern) = self.filter {
            filter = filter.with_filter(pattern);
        }

        // Compile before any provider is queried so bad patterns fail fast.
        let filter = filter.compile()?;
        let items = filter.apply(session.resolver().resolve(&specs, &opts)?);

        let formatter = config.effective_output_format().create_formatter();
        let output = formatter.format(&items, opts.as_native_path)?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}
