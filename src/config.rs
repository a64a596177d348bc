//! # Rules File
//!
//! Rules can be kept in a YAML file instead of (or in addition to) being
//! passed on the command line. The file is a single mapping with the same
//! fields as [`RuleOptions`]:
//!
//! ```yaml
//! strip_prefix: pkg
//! prefix: usr/share/doc
//! renames:
//!   - README=pkg/README.md
//! excludes:
//!   - pkg/BUILD
//! ```
//!
//! Unknown keys are rejected. Command-line values are layered on top with
//! [`RuleOptions::merge`], and the merged options go through the usual
//! [`crate::rules::RuleSet`] construction.

use crate::error::Result;
use crate::rules::RuleOptions;
use std::path::Path;

/// Parses a YAML string into [`RuleOptions`].
///
/// An empty document yields the default (empty) options.
pub fn parse(yaml_content: &str) -> Result<RuleOptions> {
    if yaml_content.trim().is_empty() {
        return Ok(RuleOptions::default());
    }
    Ok(serde_yaml::from_str(yaml_content)?)
}

/// Reads and parses a rules file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RuleOptions> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
