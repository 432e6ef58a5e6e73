// src/watch/discover.rs

//! Recursive directory discovery used to build and extend the watch set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::{GowatchError, Result};
use crate::fs::FileSystem;

/// Walk `root` and collect every directory below it, `root` included.
///
/// Symlinks are not followed. The first entry that cannot be stat'd or
/// directory that cannot be listed aborts the walk; no partial result is
/// returned. A `root` that is a plain file yields an empty set.
pub fn discover_directories(fs: &dyn FileSystem, root: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut directories = BTreeSet::new();

    if !stat_dir(fs, root)? {
        return Ok(directories);
    }

    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let children = fs.read_dir(&dir).map_err(|source| GowatchError::Traversal {
            path: dir.clone(),
            source,
        })?;

        for child in children {
            if stat_dir(fs, &child)? {
                stack.push(child);
            }
        }

        trace!(dir = ?dir, "discovered directory");
        directories.insert(dir);
    }

    Ok(directories)
}

fn stat_dir(fs: &dyn FileSystem, path: &Path) -> Result<bool> {
    fs.is_dir(path).map_err(|source| GowatchError::Traversal {
        path: path.to_path_buf(),
        source,
    })
}
