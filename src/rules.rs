//! # Rule Set Construction
//!
//! A [`RuleSet`] holds the four transformation inputs in normalized form:
//! the strip-prefix, the output prefix, the rename table and the exclusion
//! set. It is built once from raw option values ([`RuleOptions`]) and is
//! read-only afterwards.
//!
//! Construction fails with [`Error::Config`] when:
//!
//! - a rename lacks the `=` separator, or either side is empty,
//! - two renames share a source, or two renames share a destination,
//! - a prefix is absolute or climbs out of its root,
//! - an exclude or rename source is absolute or names the root itself.

use crate::error::{Error, Result};
use crate::path::RelPath;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Raw, unnormalized option values as supplied by the caller.
///
/// This is also the schema of a YAML rules file (see [`crate::config`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOptions {
    /// Directory prefix removed from every file-bearing input directory.
    pub strip_prefix: Option<String>,
    /// Directory prefix added to every destination.
    pub prefix: Option<String>,
    /// `DESTINATION=SOURCE` pairs.
    pub renames: Vec<String>,
    /// Input-relative files to omit.
    pub excludes: Vec<String>,
}

impl RuleOptions {
    /// Layer `overrides` on top of these options.
    ///
    /// Scalars set in `overrides` win; lists are appended.
    pub fn merge(mut self, overrides: RuleOptions) -> RuleOptions {
        if overrides.strip_prefix.is_some() {
            self.strip_prefix = overrides.strip_prefix;
        }
        if overrides.prefix.is_some() {
            self.prefix = overrides.prefix;
        }
        self.renames.extend(overrides.renames);
        self.excludes.extend(overrides.excludes);
        self
    }
}

/// Split a `DESTINATION=SOURCE` pair and normalize both sides.
///
/// Only the first `=` separates, so a source may itself contain `=`.
pub fn parse_rename(raw: &str) -> Result<(RelPath, RelPath)> {
    let (dest, src) = raw.split_once('=').ok_or_else(|| Error::Config {
        message: format!("rename '{}' has no '=' separator", raw),
        hint: Some("use --rename DESTINATION=SOURCE".to_string()),
    })?;

    let destination = RelPath::parse(dest).map_err(|e| config_error("rename destination", dest, e))?;
    let source = RelPath::parse(src).map_err(|e| config_error("rename source", src, e))?;

    if destination.is_root() {
        return Err(Error::Config {
            message: format!("rename '{}' does not name a destination file", raw),
            hint: None,
        });
    }
    if source.is_root() {
        return Err(Error::Config {
            message: format!("rename '{}' does not name a source file", raw),
            hint: None,
        });
    }

    Ok((destination, source))
}

fn config_error(what: &str, raw: &str, cause: Error) -> Error {
    let message = match cause {
        Error::Path { message } => message,
        other => other.to_string(),
    };
    Error::Config {
        message: format!("invalid {} '{}': {}", what, raw, message),
        hint: None,
    }
}

/// Per-file renames, indexed both by source and by destination.
///
/// Both indices are filled together, so a collision in either direction is
/// rejected as soon as it is inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    by_source: BTreeMap<RelPath, RelPath>,
    by_destination: BTreeMap<RelPath, RelPath>,
}

impl RenameTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rename of `source` to `destination`.
    pub fn insert(&mut self, destination: RelPath, source: RelPath) -> Result<()> {
        if let Some(existing) = self.by_source.get(&source) {
            return Err(Error::Config {
                message: format!(
                    "source '{}' is renamed twice (to '{}' and '{}')",
                    source, existing, destination
                ),
                hint: Some("each source file may be named by one rename".to_string()),
            });
        }
        if let Some(existing) = self.by_destination.get(&destination) {
            return Err(Error::Config {
                message: format!(
                    "duplicate rename destination '{}' (from '{}' and '{}')",
                    destination, existing, source
                ),
                hint: Some("each destination may be named by one rename".to_string()),
            });
        }
        self.by_source.insert(source.clone(), destination.clone());
        self.by_destination.insert(destination, source);
        Ok(())
    }

    /// Destination for a renamed source, if any.
    pub fn destination_for(&self, source: &RelPath) -> Option<&RelPath> {
        self.by_source.get(source)
    }

    /// `(source, destination)` pairs ordered by source.
    pub fn iter(&self) -> impl Iterator<Item = (&RelPath, &RelPath)> {
        self.by_source.iter()
    }

    /// Number of renames.
    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    /// Whether no rename was given.
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}

/// The normalized transformation rules for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    strip_prefix: Option<RelPath>,
    prefix: Option<RelPath>,
    renames: RenameTable,
    excludes: BTreeSet<RelPath>,
}

impl RuleSet {
    /// Build a rule set from raw option values.
    pub fn new(options: &RuleOptions) -> Result<Self> {
        let strip_prefix = options
            .strip_prefix
            .as_deref()
            .map(|raw| parse_prefix("strip-prefix", raw))
            .transpose()?;
        let prefix = options
            .prefix
            .as_deref()
            .map(|raw| parse_prefix("prefix", raw))
            .transpose()?;

        let mut renames = RenameTable::new();
        for raw in &options.renames {
            let (destination, source) = parse_rename(raw)?;
            renames.insert(destination, source)?;
        }

        let mut excludes = BTreeSet::new();
        for raw in &options.excludes {
            let exclude = RelPath::parse(raw).map_err(|e| config_error("exclude", raw, e))?;
            if exclude.is_root() {
                return Err(Error::Config {
                    message: format!("exclude '{}' does not name a file", raw),
                    hint: None,
                });
            }
            excludes.insert(exclude);
        }

        Ok(Self {
            strip_prefix,
            prefix,
            renames,
            excludes,
        })
    }

    /// A rule set that maps every file to the same relative location.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn strip_prefix(&self) -> Option<&RelPath> {
        self.strip_prefix.as_ref()
    }

    pub fn prefix(&self) -> Option<&RelPath> {
        self.prefix.as_ref()
    }

    pub fn renames(&self) -> &RenameTable {
        &self.renames
    }

    pub fn excludes(&self) -> &BTreeSet<RelPath> {
        &self.excludes
    }

    pub fn is_excluded(&self, source: &RelPath) -> bool {
        self.excludes.contains(source)
    }
}

fn parse_prefix(what: &str, raw: &str) -> Result<RelPath> {
    let prefix = RelPath::parse(raw).map_err(|e| config_error(what, raw, e))?;
    if prefix.escapes() {
        return Err(Error::Config {
            message: format!("{} '{}' points outside its root", what, raw),
            hint: Some("remove the leading '..' segments".to_string()),
        });
    }
    Ok(prefix)
}
