//! Dry-run planning
//!
//! [`plan`] runs enumeration, mapping and validation without touching the
//! output directory and returns the mapping together with its report. It is
//! the pure entry point of the engine: callers decide what to print and how to
//! exit. [`Plan::approve`] is the only gate from a plan to
//! [`crate::apply::apply`].

use crate::apply::ApprovedMapping;
use crate::error::{Error, Result};
use crate::mapping::{self, Mapping};
use crate::rules::RuleSet;
use crate::validate::{validate, ValidationReport};
use log::info;
use std::path::{Path, PathBuf};

/// The computed mapping of one input tree and its validation verdict.
#[derive(Debug, Clone)]
pub struct Plan {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub mapping: Mapping,
    pub report: ValidationReport,
}

impl Plan {
    /// Whether validation found nothing to complain about.
    pub fn is_approved(&self) -> bool {
        self.report.is_empty()
    }

    /// Turn the plan into something [`crate::apply::apply`] accepts.
    ///
    /// Fails with [`Error::Validation`] carrying the full report otherwise.
    pub fn approve(self) -> Result<ApprovedMapping> {
        if self.report.is_empty() {
            Ok(ApprovedMapping::new(self.mapping))
        } else {
            Err(Error::Validation(self.report))
        }
    }
}

/// Compute and validate the mapping of `input_root` into `output_root`.
///
/// The output root is made absolute (without resolving symlinks) so that the
/// escape check compares like with like. Errors are limited to failures to
/// read the input tree; rule problems end up in [`Plan::report`].
pub fn plan(input_root: &Path, output_root: &Path, rules: &RuleSet) -> Result<Plan> {
    let output_root = std::path::absolute(output_root)?;

    let outcome = mapping::build(input_root, &output_root, rules)?;
    let report = validate(
        &outcome.mapping,
        &outcome.ledger,
        &outcome.invalid_strip_dirs,
        &output_root,
    );

    info!(
        "Planned {} files from {} into {} ({} problem categories)",
        outcome.mapping.len(),
        input_root.display(),
        output_root.display(),
        report.category_count()
    );

    Ok(Plan {
        input_root: input_root.to_path_buf(),
        output_root,
        mapping: outcome.mapping,
        report,
    })
}
