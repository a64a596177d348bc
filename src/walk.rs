//! Input tree enumeration
//!
//! Walks the input directory once, top-down, and reports for every directory
//! its path relative to the input root together with the names of the files
//! directly inside it. Nothing is read or modified.

use crate::error::{Error, Result};
use crate::path::RelPath;
use log::{debug, warn};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One visited directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Directory path relative to the input root (root itself is empty).
    pub relative_dir: RelPath,
    /// Names of the files directly within the directory, in name order.
    pub files: Vec<OsString>,
}

impl DirListing {
    /// Build a listing from parts; handy for callers that do not walk a real tree.
    pub fn new(
        relative_dir: RelPath,
        files: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        Self {
            relative_dir,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any file sits directly in this directory.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Enumerate `input_root` recursively.
///
/// Directories are listed parents first and siblings in name order. Symlinks
/// are not followed; a symlink that resolves to a regular file is listed as a
/// file, any other non-regular entry is skipped with a warning.
pub fn enumerate(input_root: &Path) -> Result<Vec<DirListing>> {
    if !input_root.is_dir() {
        return Err(Error::Path {
            message: format!("Input is not a directory: {}", input_root.display()),
        });
    }

    let mut listings: Vec<DirListing> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for entry in walkdir::WalkDir::new(input_root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let relative = path.strip_prefix(input_root).map_err(|_| Error::Path {
                message: format!("Failed to make path relative: {}", path.display()),
            })?;
            index.insert(path.to_path_buf(), listings.len());
            listings.push(DirListing::new(RelPath::from_path(relative)?, Vec::<OsString>::new()));
            continue;
        }

        let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
        if !is_file {
            warn!("Skipping non-regular entry: {}", path.display());
            continue;
        }

        let slot = path
            .parent()
            .and_then(|parent| index.get(parent))
            .copied()
            .ok_or_else(|| Error::Path {
                message: format!("File outside any visited directory: {}", path.display()),
            })?;
        listings[slot].files.push(entry.file_name().to_os_string());
    }

    debug!(
        "Enumerated {} directories under {}",
        listings.len(),
        input_root.display()
    );
    Ok(listings)
}
