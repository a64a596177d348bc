//! Filter command implementation
//!
//! Runs the whole pipeline for one input directory:
//! 1. Build the rule set from the rules file (if any) and the command line
//! 2. Map the input tree and validate the mapping
//! 3. Print the report and fail, print the mapping (dry run), or copy

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use filter_directory::apply::apply_parallel;
use filter_directory::config;
use filter_directory::output::{
    emoji, render_mapping_json, render_mapping_text, render_report, OutputConfig,
};
use filter_directory::plan::plan;
use filter_directory::rules::{RuleOptions, RuleSet};

/// Format of the dry-run listing
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListingFormat {
    /// One `source -> destination` line per file
    Text,
    /// A JSON array of mapping entries
    Json,
}

/// Arguments for the filter command
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Input directory
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Directory prefix to strip from all incoming paths
    #[arg(long, value_name = "PATH")]
    pub strip_prefix: Option<String>,

    /// Prefix to add to all output paths
    #[arg(long, value_name = "PATH")]
    pub prefix: Option<String>,

    /// Rename one file; only supports files (repeatable)
    #[arg(long, value_name = "DEST=SRC")]
    pub rename: Vec<String>,

    /// Input file to exclude from the output directory (repeatable)
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<String>,

    /// YAML file with strip_prefix, prefix, renames and excludes
    #[arg(long, value_name = "FILE", env = "FILTER_DIRECTORY_RULES")]
    pub rules: Option<PathBuf>,

    /// Validate and print the mapping without copying anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Listing format for --dry-run
    #[arg(long, value_enum, default_value = "text")]
    pub format: ListingFormat,

    /// Number of parallel copy workers
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Suppress all output except errors and the dry-run listing
    #[arg(short, long)]
    pub quiet: bool,
}

impl FilterArgs {
    fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            strip_prefix: self.strip_prefix.clone(),
            prefix: self.prefix.clone(),
            renames: self.rename.clone(),
            excludes: self.exclude.clone(),
        }
    }
}

/// Execute the filter command
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: FilterArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    let file_options = match &args.rules {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load rules file {}", path.display()))?,
        None => RuleOptions::default(),
    };
    let rules = RuleSet::new(&file_options.merge(args.rule_options()))?;

    let plan = plan(&args.input_dir, &args.output_dir, &rules)?;
    if !plan.is_approved() {
        eprint!("{}", render_report(&out, &plan.report));
        bail!(
            "{} problem categories found; no files were copied",
            plan.report.category_count()
        );
    }

    if args.dry_run {
        let listing = match args.format {
            ListingFormat::Text => render_mapping_text(&plan.mapping),
            ListingFormat::Json => format!("{}\n", render_mapping_json(&plan.mapping)?),
        };
        print!("{}", listing);
        return Ok(());
    }

    let output_root = plan.output_root.clone();
    let stats = apply_parallel(&plan.approve()?, args.jobs)?;

    if !args.quiet {
        println!(
            "{} Copied {} files ({} bytes) into {} in {:.2}s",
            emoji(&out, "✅", "[OK]"),
            stats.files_copied,
            stats.bytes_copied,
            output_root.display(),
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
