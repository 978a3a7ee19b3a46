//! File access used by include resolution.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::error::LoadError;
use super::paths::normalize_path;

/// Reads include files and finds the shared include directory.
pub trait FileSystem {
    /// Read a whole file as text.
    fn read(&self, path: &Path) -> Result<String, LoadError>;

    /// Find a directory called `name` in `start` or one of its ancestors,
    /// nearest first.
    fn find_ancestor_dir(&self, name: &str, start: &Path) -> Option<PathBuf>;
}

/// The real file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> Result<String, LoadError> {
        std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))
    }

    fn find_ancestor_dir(&self, name: &str, start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_dir())
    }
}

/// An in-memory file tree.
///
/// Directories exist implicitly as ancestors of stored files. Useful for
/// hosts that hold unsaved buffers, and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryFileSystem {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Store a file, replacing any previous content.
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .insert(normalize_path(path.as_ref()), content.into());
    }

    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<String> {
        self.files.remove(&normalize_path(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn is_dir(&self, dir: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != dir && file.starts_with(dir))
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> Result<String, LoadError> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
    }

    fn find_ancestor_dir(&self, name: &str, start: &Path) -> Option<PathBuf> {
        normalize_path(start)
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| self.is_dir(candidate))
    }
}
