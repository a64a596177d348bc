//! # Mapping Construction
//!
//! Turns the enumerated input tree plus a [`RuleSet`] into a source to
//! destination [`Mapping`], in a single pass over the directory listings.
//!
//! ## Placement
//!
//! For each directory, the destination directory is the output root, then the
//! output prefix (if any), then the directory's input-relative path with the
//! strip-prefix removed. Files land in that directory under their own name,
//! except:
//!
//! - **Excluded files** are dropped. Exclusion wins over renaming, so a file
//!   that is both excluded and renamed leaves its rename unused.
//! - **Renamed files** go to output root + prefix + rename destination; the
//!   per-directory placement is ignored.
//!
//! Destinations are stored lexically normalized, so a rename such as
//! `../top` under prefix `p` is recorded as `out/top`, never `out/p/../top`.
//!
//! ## Deferred problems
//!
//! Nothing here fails. A file-bearing directory outside the strip-prefix is
//! recorded and placed unstripped; duplicate destinations are all kept. Both
//! are left to [`crate::validate`], so one pass surfaces every problem.

use crate::error::Result;
use crate::path::{normalize_lexically, RelPath};
use crate::rules::RuleSet;
use crate::walk::{self, DirListing};
use log::debug;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One planned copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    /// Source file (input root joined with the relative source).
    #[serde(serialize_with = "serialize_lossy")]
    pub source: PathBuf,
    /// Source file relative to the input root.
    pub relative_source: RelPath,
    /// Destination file, lexically normalized.
    #[serde(serialize_with = "serialize_lossy")]
    pub destination: PathBuf,
}

fn serialize_lossy<S: Serializer>(
    path: &Path,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&path.display())
}

/// Planned copies in enumeration order.
///
/// May hold several entries with the same destination until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a planned copy.
    pub fn push(&mut self, entry: MappingEntry) {
        self.entries.push(entry);
    }

    /// Number of planned copies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is planned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Planned copies in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    /// Planned copies as a slice, for parallel iteration.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Destination planned for an input-relative source, if it was mapped.
    pub fn destination_of(&self, relative_source: &RelPath) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| &e.relative_source == relative_source)
            .map(|e| e.destination.as_path())
    }
}

/// Rename bookkeeping: where the rename points and whether it fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameUsage {
    pub destination: RelPath,
    pub used: bool,
}

/// Which excludes and renames were triggered by a real file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageLedger {
    excludes: BTreeMap<RelPath, bool>,
    renames: BTreeMap<RelPath, RenameUsage>,
}

impl UsageLedger {
    /// A ledger with every rule of `rules` marked unused.
    pub fn for_rules(rules: &RuleSet) -> Self {
        Self {
            excludes: rules.excludes().iter().map(|e| (e.clone(), false)).collect(),
            renames: rules
                .renames()
                .iter()
                .map(|(src, dest)| {
                    (
                        src.clone(),
                        RenameUsage {
                            destination: dest.clone(),
                            used: false,
                        },
                    )
                })
                .collect(),
        }
    }

    fn mark_exclude_used(&mut self, source: &RelPath) {
        if let Some(used) = self.excludes.get_mut(source) {
            *used = true;
        }
    }

    fn mark_rename_used(&mut self, source: &RelPath) {
        if let Some(usage) = self.renames.get_mut(source) {
            usage.used = true;
        }
    }

    pub fn exclude_used(&self, exclude: &RelPath) -> bool {
        self.excludes.get(exclude).copied().unwrap_or(false)
    }

    pub fn rename_used(&self, source: &RelPath) -> bool {
        self.renames.get(source).is_some_and(|u| u.used)
    }

    /// Excludes that matched no file, in path order.
    pub fn unused_excludes(&self) -> impl Iterator<Item = &RelPath> {
        self.excludes
            .iter()
            .filter(|(_, used)| !**used)
            .map(|(exclude, _)| exclude)
    }

    /// `(source, destination)` of renames that matched no file, in source order.
    pub fn unused_renames(&self) -> impl Iterator<Item = (&RelPath, &RelPath)> {
        self.renames
            .iter()
            .filter(|(_, usage)| !usage.used)
            .map(|(src, usage)| (src, &usage.destination))
    }
}

/// Everything the mapping pass produces.
#[derive(Debug, Clone, Default)]
pub struct MappingOutcome {
    pub mapping: Mapping,
    pub ledger: UsageLedger,
    /// File-bearing directories not under the strip-prefix, in visit order.
    pub invalid_strip_dirs: Vec<RelPath>,
}

/// Build the mapping from pre-enumerated directory listings.
pub fn build_from_listings<'a, I>(
    input_root: &Path,
    output_root: &Path,
    rules: &RuleSet,
    listings: I,
) -> MappingOutcome
where
    I: IntoIterator<Item = &'a DirListing>,
{
    let mut outcome = MappingOutcome {
        ledger: UsageLedger::for_rules(rules),
        ..Default::default()
    };

    let prefixed_root = match rules.prefix() {
        Some(prefix) => prefix.under(output_root),
        None => output_root.to_path_buf(),
    };

    for listing in listings {
        let rel_dir = &listing.relative_dir;

        let mut dest_rel_dir = rel_dir.clone();
        if let Some(strip) = rules.strip_prefix().filter(|_| listing.has_files()) {
            match rel_dir.strip_prefix(strip) {
                Some(stripped) => dest_rel_dir = stripped,
                None => {
                    debug!("strip-prefix '{}' does not apply to '{}'", strip, rel_dir);
                    outcome.invalid_strip_dirs.push(rel_dir.clone());
                }
            }
        }
        let dest_dir = dest_rel_dir.under(&prefixed_root);

        for name in &listing.files {
            let rel_src = rel_dir.join_name(name);

            if rules.is_excluded(&rel_src) {
                outcome.ledger.mark_exclude_used(&rel_src);
                debug!("excluded {}", rel_src);
                continue;
            }

            let destination = match rules.renames().destination_for(&rel_src) {
                Some(renamed) => {
                    outcome.ledger.mark_rename_used(&rel_src);
                    normalize_lexically(&renamed.under(&prefixed_root))
                }
                None => normalize_lexically(&dest_dir.join(name)),
            };

            debug!("{} -> {}", rel_src, destination.display());
            outcome.mapping.push(MappingEntry {
                source: rel_src.under(input_root),
                relative_source: rel_src,
                destination,
            });
        }
    }

    outcome
}

/// Walk `input_root` and build its mapping.
pub fn build(input_root: &Path, output_root: &Path, rules: &RuleSet) -> Result<MappingOutcome> {
    let listings = walk::enumerate(input_root)?;
    Ok(build_from_listings(
        input_root,
        output_root,
        rules,
        &listings,
    ))
}
