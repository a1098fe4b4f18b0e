//! Project root discovery and resource lookup
//!
//! Relative resources such as `.env` are resolved against an ordered list of
//! directories. The project root is added to that list once, as an explicit
//! bootstrap step.

use std::path::{Path, PathBuf};

/// Entries whose presence marks a project root
pub const ROOT_MARKERS: [&str; 3] = ["Cargo.toml", ".git", ".env"];

/// Walk up from `start` to the first directory containing a root marker.
pub fn discover_project_root(start: impl AsRef<Path>) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Ordered directories used to resolve relative resource paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search path starting with the current working directory
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self {
            dirs: vec![std::env::current_dir()?],
        })
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Put `root` first unless it is already present. Returns whether it was added.
    pub fn add_project_root(&mut self, root: impl Into<PathBuf>) -> bool {
        let root = root.into();
        if self.dirs.contains(&root) {
            return false;
        }
        tracing::debug!(root = %root.display(), "adding project root to search path");
        self.dirs.insert(0, root);
        true
    }

    /// Append `dir` unless it is already present
    pub fn push(&mut self, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        if self.dirs.contains(&dir) {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    /// First existing match for `relative`; absolute paths are returned unchanged.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        if relative.is_absolute() {
            return Some(relative.to_path_buf());
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.exists())
    }
}
