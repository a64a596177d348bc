//! Path algebra for filter-directory
//!
//! Every rule key and every tree-relative location is held as a [`RelPath`]:
//! a sequence of normalized segments. Prefix tests and prefix removal work on
//! whole segments, so `sub` is never a prefix of `subdir`. Segments are kept
//! as OS strings so names that are not valid UTF-8 survive unchanged; only
//! [`fmt::Display`] is lossy.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A relative, lexically normalized path.
///
/// `.` segments and empty segments are dropped, and `name/..` pairs cancel
/// out. Leading `..` segments that cannot be cancelled are kept, which lets
/// callers detect paths that climb out of their root (see [`RelPath::escapes`]).
/// The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelPath {
    segments: Vec<OsString>,
}

impl RelPath {
    /// The empty path (the root directory).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse and normalize a relative path string.
    ///
    /// Absolute paths are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_path(Path::new(raw))
    }

    /// Normalize a relative [`Path`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut rel = Self::root();
        for component in path.components() {
            match component {
                Component::Normal(segment) => rel.segments.push(segment.to_os_string()),
                Component::CurDir => {}
                Component::ParentDir => rel.push_parent(),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::Path {
                        message: format!("Expected a relative path, got {}", path.display()),
                    });
                }
            }
        }
        Ok(rel)
    }

    fn push_parent(&mut self) {
        match self.segments.last() {
            Some(last) if last != ".." => {
                self.segments.pop();
            }
            _ => self.segments.push(OsString::from("..")),
        }
    }

    /// The normalized segments.
    pub fn segments(&self) -> &[OsString] {
        &self.segments
    }

    /// Whether this is the root (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the path climbs above its root.
    pub fn escapes(&self) -> bool {
        self.segments.first().is_some_and(|s| s == "..")
    }

    /// Segment-wise prefix test.
    pub fn starts_with(&self, prefix: &RelPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Remove `prefix` from the front of this path.
    ///
    /// Returns `None` when `prefix` is not a segment-wise prefix.
    pub fn strip_prefix(&self, prefix: &RelPath) -> Option<RelPath> {
        if !self.starts_with(prefix) {
            return None;
        }
        Some(Self {
            segments: self.segments[prefix.segments.len()..].to_vec(),
        })
    }

    /// Append `other`, normalizing any `..` it carries.
    pub fn join(&self, other: &RelPath) -> RelPath {
        let mut joined = self.clone();
        for segment in &other.segments {
            if segment == ".." {
                joined.push_parent();
            } else {
                joined.segments.push(segment.clone());
            }
        }
        joined
    }

    /// Append a single file name.
    pub fn join_name(&self, name: &OsStr) -> RelPath {
        let mut joined = self.clone();
        joined.segments.push(name.to_os_string());
        joined
    }

    /// Place this path under `base`, one segment at a time.
    ///
    /// The root maps to `base` itself (no trailing separator).
    pub fn under(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        for segment in &self.segments {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, ".");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", segment.to_string_lossy())?;
        }
        Ok(())
    }
}

impl Serialize for RelPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Lexically normalize an arbitrary path without touching the filesystem.
///
/// `.` components are removed and `..` cancels the preceding normal
/// component. `..` directly under the root stays at the root; leading `..`
/// of a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Whether `path` lies strictly below `root`, after lexical normalization.
pub fn is_strictly_within(path: &Path, root: &Path) -> bool {
    let path = normalize_lexically(path);
    let root = normalize_lexically(root);
    path != root && path.starts_with(&root)
}
