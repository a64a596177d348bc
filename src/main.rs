//! # filter-directory CLI
//!
//! This is the binary entry point for the `filter-directory` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Handing the parsed arguments to the filter command and translating its
//!   errors into a non-zero exit status.
//!
//! All mapping and validation logic lives in the `filter_directory` library
//! crate; the binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
