// src/fs/mock.rs

use super::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File,
    Dir(Vec<String>), // List of child names
}

/// In-memory tree used to exercise directory discovery without touching disk.
///
/// Paths are stored exactly as given; tests should use absolute paths.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    broken: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.clone(), MockEntry::File);
        Self::link_to_parent(&mut entries, &path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        entries
            .entry(path.clone())
            .or_insert_with(|| MockEntry::Dir(Vec::new()));
        Self::link_to_parent(&mut entries, &path);
    }

    /// Make every stat or listing of `path` fail with `PermissionDenied`.
    pub fn break_path(&self, path: impl AsRef<Path>) {
        self.broken
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    fn link_to_parent(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if parent.as_os_str().is_empty() {
            return;
        }

        if !entries.contains_key(parent) {
            entries.insert(parent.to_path_buf(), MockEntry::Dir(Vec::new()));
            Self::link_to_parent(entries, parent);
        }

        if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
            let name = name.to_string_lossy().into_owned();
            if !children.contains(&name) {
                children.push(name);
            }
        }
    }

    fn check_broken(&self, path: &Path) -> io::Result<()> {
        if self.broken.lock().unwrap().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {:?}", path),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        self.check_broken(path)?;
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::Dir(_)) => Ok(true),
            Some(MockEntry::File) => Ok(false),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {:?}", path),
            )),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.check_broken(path)?;
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory or not found: {:?}", path),
            )),
        }
    }
}
