//! Applying an approved mapping to disk
//!
//! For each planned copy, creates the missing parent directories of the
//! destination and copies the source bytes over. The first failure aborts the
//! remaining copies; files already written stay in place.
//!
//! Only an [`ApprovedMapping`] can be applied, and the only way to obtain one
//! is [`crate::plan::Plan::approve`], so a mapping that failed validation can
//! never reach the filesystem.

use crate::error::{Error, Result};
use crate::mapping::{Mapping, MappingEntry};
use log::{debug, info};
use rayon::prelude::*;
use std::fs;
use std::ops::Add;

/// A mapping that passed validation.
///
/// Destinations are pairwise distinct, strictly inside the output root, and
/// none lies beneath another.
#[derive(Debug, Clone)]
pub struct ApprovedMapping {
    mapping: Mapping,
}

impl ApprovedMapping {
    pub(crate) fn new(mapping: Mapping) -> Self {
        Self { mapping }
    }

    /// The validated copies.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }
}

/// Totals for one apply run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub files_copied: usize,
    pub bytes_copied: u64,
}

impl Add for ApplyStats {
    type Output = ApplyStats;

    fn add(self, other: ApplyStats) -> ApplyStats {
        ApplyStats {
            files_copied: self.files_copied + other.files_copied,
            bytes_copied: self.bytes_copied + other.bytes_copied,
        }
    }
}

/// Copy every entry, one after another.
pub fn apply(approved: &ApprovedMapping) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();
    for entry in approved.mapping().iter() {
        stats = stats + copy_entry(entry)?;
    }
    info!(
        "Copied {} files ({} bytes)",
        stats.files_copied, stats.bytes_copied
    );
    Ok(stats)
}

/// Copy every entry on a pool of `jobs` worker threads.
///
/// Safe because destinations are pairwise distinct and `create_dir_all`
/// tolerates a directory created concurrently by another worker.
pub fn apply_parallel(approved: &ApprovedMapping, jobs: usize) -> Result<ApplyStats> {
    if jobs <= 1 {
        return apply(approved);
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let per_file: Vec<ApplyStats> = pool.install(|| {
        approved
            .mapping()
            .entries()
            .par_iter()
            .map(copy_entry)
            .collect::<Result<Vec<_>>>()
    })?;

    let stats = per_file
        .into_iter()
        .fold(ApplyStats::default(), |acc, s| acc + s);
    info!(
        "Copied {} files ({} bytes) using {} workers",
        stats.files_copied, stats.bytes_copied, jobs
    );
    Ok(stats)
}

fn copy_entry(entry: &MappingEntry) -> Result<ApplyStats> {
    let copy_error = |source: std::io::Error| Error::Copy {
        src: entry.source.clone(),
        dst: entry.destination.clone(),
        source,
    };

    if let Some(parent) = entry.destination.parent() {
        fs::create_dir_all(parent).map_err(copy_error)?;
    }
    let bytes = fs::copy(&entry.source, &entry.destination).map_err(copy_error)?;
    debug!(
        "Copied {} -> {}",
        entry.source.display(),
        entry.destination.display()
    );

    Ok(ApplyStats {
        files_copied: 1,
        bytes_copied: bytes,
    })
}
