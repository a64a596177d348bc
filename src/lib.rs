//! # filter-directory
//!
//! Copies a directory tree into an output directory while applying four
//! independent rules: strip a directory prefix, add an output prefix, rename
//! individual files, and exclude individual files. Nothing is copied unless the
//! whole rule set is consistent with the input tree.
//!
//! ## Quick Example
//!
//! ```no_run
//! use filter_directory::plan::plan;
//! use filter_directory::rules::{RuleOptions, RuleSet};
//! use std::path::Path;
//!
//! let rules = RuleSet::new(&RuleOptions {
//!     prefix: Some("usr/share/doc".to_string()),
//!     renames: vec!["README=README.md".to_string()],
//!     ..Default::default()
//! })?;
//!
//! let plan = plan(Path::new("pkg"), Path::new("out"), &rules)?;
//! if !plan.is_approved() {
//!     eprint!("{}", plan.report);
//! } else {
//!     let stats = filter_directory::apply::apply(&plan.approve()?)?;
//!     println!("{} files copied", stats.files_copied);
//! }
//! # Ok::<(), filter_directory::error::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Rules** (`rules`, `config`): raw option values are normalized into a
//!    `RuleSet`; malformed or ambiguous renames fail here.
//! 2. **Enumeration** (`walk`): the input tree is listed directory by
//!    directory.
//! 3. **Mapping** (`mapping`): every file gets a destination, and the usage
//!    of each exclude and rename is recorded.
//! 4. **Validation** (`validate`): unused rules, strip-prefix misses, escaping
//!    and colliding destinations are collected into one report.
//! 5. **Application** (`apply`): an approved mapping is copied to disk.
//!
//! Steps 2 to 4 are bundled as the side-effect-free [`plan::plan`].

pub mod apply;
pub mod config;
pub mod error;
pub mod mapping;
pub mod output;
pub mod path;
pub mod plan;
pub mod rules;
pub mod validate;
pub mod walk;

#[cfg(test)]
mod path_proptest;
