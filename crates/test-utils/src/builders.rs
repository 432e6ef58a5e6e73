use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary project directory with a fixed final segment (e.g. `proj`), so
/// binary-name derivation is predictable.
pub struct ProjectTree {
    _tmp: TempDir,
    root: PathBuf,
}

impl ProjectTree {
    /// Create `<tmp>/<name>` and canonicalize it.
    pub fn new(name: &str) -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = tmp.path().join(name);
        fs::create_dir_all(&root).expect("create project root");
        let root = root.canonicalize().expect("canonicalize project root");
        Self { _tmp: tmp, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `rel` inside the project.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn with_dir(self, rel: &str) -> Self {
        self.mkdir(rel);
        self
    }

    pub fn with_file(self, rel: &str, contents: &str) -> Self {
        self.write(rel, contents);
        self
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).expect("create directory");
        path
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write file");
        path
    }
}
