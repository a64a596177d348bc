//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::Parser;

use crate::commands;

/// Copy a directory tree, stripping, prefixing, renaming and excluding paths.
///
/// The whole input tree is mapped and checked before anything is copied. Unused
/// excludes or renames, directories outside --strip-prefix, destinations outside
/// OUTPUT_DIR, destinations claimed twice and destinations beneath another file
/// are all reported together, and nothing is written.
#[derive(Parser, Debug)]
#[command(name = "filter-directory")]
#[command(version, about, long_about)]
pub struct Cli {
    #[command(flatten)]
    filter: commands::filter::FilterArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        commands::filter::execute(self.filter, &self.color)
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
