//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sprout_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, Removal},
    },
    error::{SproutError, SproutResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle while the
/// pipeline owns another. Paths registered with [`Self::deny`] make every
/// mutating or reading operation on them (or below them) fail, standing in
/// for permission errors.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    denied: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn is_denied(&self, path: &Path) -> bool {
        self.denied.iter().any(|d| path.starts_with(d))
    }

    fn add_dir(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory and its ancestors (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.write_lock().add_dir(path.as_ref());
    }

    /// Create a file, creating parent directories as needed (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref();
        let mut inner = self.write_lock();
        if let Some(parent) = path.parent() {
            inner.add_dir(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
    }

    /// Make operations on `path` and everything below it fail.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.write_lock().denied.insert(path.as_ref().to_path_buf());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_lock().files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_lock().files.keys().cloned().collect()
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn fs_error(path: &Path, reason: &str) -> SproutError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.read_lock();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read_lock().directories.contains(path)
    }

    fn is_empty_dir(&self, path: &Path) -> SproutResult<bool> {
        let inner = self.read_lock();
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "Not a directory"));
        }
        let has_child = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .any(|p| p.parent() == Some(path));
        Ok(!has_child)
    }

    fn read_to_string(&self, path: &Path) -> SproutResult<String> {
        let inner = self.read_lock();
        if inner.is_denied(path) {
            return Err(fs_error(path, "Permission denied"));
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()> {
        let mut inner = self.write_lock();
        if inner.is_denied(path) {
            return Err(fs_error(path, "Permission denied"));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> SproutResult<Removal> {
        let mut inner = self.write_lock();
        if inner.is_denied(path) {
            return Err(fs_error(path, "Permission denied"));
        }
        Ok(match inner.files.remove(path) {
            Some(_) => Removal::Removed,
            None => Removal::Absent,
        })
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<Removal> {
        let mut inner = self.write_lock();
        if inner.is_denied(path) {
            return Err(fs_error(path, "Permission denied"));
        }
        if !inner.directories.contains(path) {
            return Ok(Removal::Absent);
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(Removal::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/src/app/page.tsx", "x");
        assert!(fs.is_dir(Path::new("/p/src/app")));
        assert!(!fs.is_empty_dir(Path::new("/p")).unwrap());
    }

    #[test]
    fn empty_directory() {
        let fs = MemoryFilesystem::new();
        fs.add_dir("/p");
        assert!(fs.is_empty_dir(Path::new("/p")).unwrap());
        assert!(fs.is_empty_dir(Path::new("/missing")).is_err());
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/docs/a.md", "a");
        fs.add_file("/p/docs-extra/b.md", "b");
        assert_eq!(
            fs.remove_dir_all(Path::new("/p/docs")).unwrap(),
            Removal::Removed
        );
        assert!(!fs.exists(Path::new("/p/docs/a.md")));
        assert!(fs.exists(Path::new("/p/docs-extra/b.md")));
        assert_eq!(
            fs.remove_dir_all(Path::new("/p/docs")).unwrap(),
            Removal::Absent
        );
    }

    #[test]
    fn denied_paths_fail() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/.github/workflows/ci.yml", "on: push");
        fs.deny("/p/.github");
        assert!(fs.remove_dir_all(Path::new("/p/.github")).is_err());
        assert!(
            fs.read_to_string(Path::new("/p/.github/workflows/ci.yml"))
                .is_err()
        );
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.txt"), "x").is_err());
        fs.add_dir("/p");
        fs.write_file(Path::new("/p/a.txt"), "x").unwrap();
        assert_eq!(fs.read_file("/p/a.txt").as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.add_file("/p/a.txt", "x");
        assert_eq!(handle.list_files(), [PathBuf::from("/p/a.txt")]);
        handle.add_file("/p/b.txt", "y");
        assert_eq!(fs.read_file("/p/b.txt").as_deref(), Some("y"));
    }
}
