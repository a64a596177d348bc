//! # Output Rendering
//!
//! Turns plans and validation reports into terminal text, respecting the
//! user's color preferences.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use crate::error::Result;
use crate::mapping::Mapping;
use crate::validate::ValidationReport;
use console::style;
use std::env;
use std::fmt::Write;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` and `never` are taken literally; anything else means detect.
    /// In detect mode colors are off if `NO_COLOR` is set, `CLICOLOR=0`,
    /// `TERM=dumb`, or stderr is not a color terminal (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Reports go to stderr, so that is the stream whose capabilities matter.
        console::Term::stderr().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Render a validation report, one section per failure category.
///
/// Without color this is exactly the report's `Display` output.
pub fn render_report(config: &OutputConfig, report: &ValidationReport) -> String {
    if !config.use_color {
        return report.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        emoji(config, "❌", "[ERR]"),
        style("Refusing to continue due to:").red().bold()
    );
    for (heading, lines) in report.sections() {
        let _ = writeln!(out, "    {}:", style(heading).yellow());
        for line in lines {
            let _ = writeln!(out, "        {}", line);
        }
    }
    out
}

/// Render a mapping as `source -> destination` lines.
pub fn render_mapping_text(mapping: &Mapping) -> String {
    let mut out = String::new();
    for entry in mapping.iter() {
        let _ = writeln!(
            out,
            "{} -> {}",
            entry.source.display(),
            entry.destination.display()
        );
    }
    out
}

/// Render a mapping as a pretty-printed JSON array.
pub fn render_mapping_json(mapping: &Mapping) -> Result<String> {
    Ok(serde_json::to_string_pretty(mapping)?)
}
