//! # Error Handling
//!
//! This module defines the error type shared by every stage of the
//! filter-directory pipeline. It uses the `thiserror` library to build a
//! single `Error` enum whose variants follow the pipeline's failure taxonomy:
//!
//! - **`Config`**: the rule set could not be constructed (malformed rename
//!   syntax, a source or destination named by two renames, an absolute or
//!   climbing prefix). Raised before the input tree is walked.
//! - **`Validation`**: the dry-run mapping was rejected. Carries the complete
//!   [`ValidationReport`] so that every problem in the tree is reported at once.
//! - **`Copy`**: a file could not be copied (or its destination directory could
//!   not be created) while applying an approved mapping. Names the failing pair.
//!
//! The remaining variants wrap lower-level failures (walking the input tree,
//! reading a rules file, serializing a listing).

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationReport;

/// Main error type for filter-directory operations
#[derive(Error, Debug)]
pub enum Error {
    /// The rule set is malformed or internally inconsistent.
    ///
    /// Includes an optional hint about how to fix the offending option.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The mapping failed validation; nothing was copied.
    #[error("{0}")]
    Validation(ValidationReport),

    /// Copying one source file to its destination failed.
    #[error("Failed to copy {} -> {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// The input tree could not be walked.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A rules file could not be parsed.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A mapping listing could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool for parallel copying could not be started.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
