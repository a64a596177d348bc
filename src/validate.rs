//! # Mapping Validation
//!
//! Inspects a finished mapping and its usage ledger and collects every
//! problem into one [`ValidationReport`]. All six checks always run:
//!
//! 1. file-bearing directories the strip-prefix did not apply to,
//! 2. excludes that matched no file,
//! 3. renames that matched no file (including renames of excluded files),
//! 4. destinations that do not lie strictly under the output root,
//! 5. destinations claimed by more than one source,
//! 6. destinations lying beneath another destination, which would need that
//!    file to be a directory.
//!
//! Validation does no I/O. An empty report approves the mapping.

use crate::mapping::{Mapping, UsageLedger};
use crate::path::{is_strictly_within, normalize_lexically, RelPath};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A rename whose source never appeared in the input tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedRename {
    pub source: RelPath,
    pub destination: RelPath,
}

/// A mapping entry whose destination falls outside the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EscapingDestination {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// A destination produced by more than one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateDestination {
    pub destination: PathBuf,
    pub sources: Vec<PathBuf>,
}

/// A destination whose parent chain contains another file's destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedDestination {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub ancestor_source: PathBuf,
    pub ancestor: PathBuf,
}

/// Every problem found in one mapping, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub invalid_strip_dirs: Vec<RelPath>,
    pub unused_excludes: Vec<RelPath>,
    pub unused_renames: Vec<UnusedRename>,
    pub escaping_destinations: Vec<EscapingDestination>,
    pub duplicate_destinations: Vec<DuplicateDestination>,
    pub nested_destinations: Vec<NestedDestination>,
}

impl ValidationReport {
    /// True when no category has any entry.
    pub fn is_empty(&self) -> bool {
        self.category_count() == 0
    }

    /// Number of categories with at least one entry.
    pub fn category_count(&self) -> usize {
        [
            !self.invalid_strip_dirs.is_empty(),
            !self.unused_excludes.is_empty(),
            !self.unused_renames.is_empty(),
            !self.escaping_destinations.is_empty(),
            !self.duplicate_destinations.is_empty(),
            !self.nested_destinations.is_empty(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Section headings and their lines, for the categories that are present.
    pub fn sections(&self) -> Vec<(&'static str, Vec<String>)> {
        let mut sections = Vec::new();
        if !self.invalid_strip_dirs.is_empty() {
            sections.push((
                "strip_prefix does not apply to directories",
                self.invalid_strip_dirs.iter().map(|d| d.to_string()).collect(),
            ));
        }
        if !self.unused_excludes.is_empty() {
            sections.push((
                "Unused exclusions",
                self.unused_excludes.iter().map(|e| e.to_string()).collect(),
            ));
        }
        if !self.unused_renames.is_empty() {
            sections.push((
                "Unused renames",
                self.unused_renames
                    .iter()
                    .map(|r| format!("{} -> {}", r.source, r.destination))
                    .collect(),
            ));
        }
        if !self.escaping_destinations.is_empty() {
            sections.push((
                "Destinations outside the output directory",
                self.escaping_destinations
                    .iter()
                    .map(|e| format!("{} -> {}", e.source.display(), e.destination.display()))
                    .collect(),
            ));
        }
        if !self.duplicate_destinations.is_empty() {
            let mut lines = Vec::new();
            for dup in &self.duplicate_destinations {
                lines.push(dup.destination.display().to_string());
                for source in &dup.sources {
                    lines.push(format!("    <- {}", source.display()));
                }
            }
            sections.push(("Duplicate destinations", lines));
        }
        if !self.nested_destinations.is_empty() {
            sections.push((
                "Destinations beneath another file",
                self.nested_destinations
                    .iter()
                    .map(|n| {
                        format!(
                            "{} -> {} is under {} -> {}",
                            n.source.display(),
                            n.destination.display(),
                            n.ancestor_source.display(),
                            n.ancestor.display()
                        )
                    })
                    .collect(),
            ));
        }
        sections
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Refusing to continue due to:")?;
        for (heading, lines) in self.sections() {
            writeln!(f, "    {}:", heading)?;
            for line in lines {
                writeln!(f, "        {}", line)?;
            }
        }
        Ok(())
    }
}

/// Check a mapping and report every problem found.
pub fn validate(
    mapping: &Mapping,
    ledger: &UsageLedger,
    invalid_strip_dirs: &[RelPath],
    output_root: &Path,
) -> ValidationReport {
    let mut report = ValidationReport {
        invalid_strip_dirs: invalid_strip_dirs.to_vec(),
        unused_excludes: ledger.unused_excludes().cloned().collect(),
        unused_renames: ledger
            .unused_renames()
            .map(|(source, destination)| UnusedRename {
                source: source.clone(),
                destination: destination.clone(),
            })
            .collect(),
        ..Default::default()
    };

    let mut by_destination: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in mapping.iter() {
        if !is_strictly_within(&entry.destination, output_root) {
            report.escaping_destinations.push(EscapingDestination {
                source: entry.source.clone(),
                destination: entry.destination.clone(),
            });
        }
        by_destination
            .entry(normalize_lexically(&entry.destination))
            .or_default()
            .push(entry.source.clone());
    }

    for (destination, sources) in &by_destination {
        for ancestor in destination.ancestors().skip(1) {
            if let Some(ancestor_sources) = by_destination.get(ancestor) {
                report.nested_destinations.push(NestedDestination {
                    source: sources[0].clone(),
                    destination: destination.clone(),
                    ancestor_source: ancestor_sources[0].clone(),
                    ancestor: ancestor.to_path_buf(),
                });
            }
        }
    }

    report.duplicate_destinations = by_destination
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(destination, sources)| DuplicateDestination {
            destination,
            sources,
        })
        .collect();

    report
}
