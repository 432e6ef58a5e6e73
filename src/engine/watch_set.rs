// src/engine/watch_set.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directories currently subscribed for change notification.
///
/// Only grows: removed or renamed directories are never dropped during a
/// run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSet {
    dirs: BTreeSet<PathBuf>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `dir`; returns false if it was already present.
    pub fn insert(&mut self, dir: PathBuf) -> bool {
        self.dirs.insert(dir)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}
