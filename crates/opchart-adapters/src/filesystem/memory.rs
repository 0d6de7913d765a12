//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use opchart_core::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    error::OpchartResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to a service
/// and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> OpchartResult<()> {
        let path = path.as_ref();
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            inner.add_dirs(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
        Ok(())
    }

    /// Seed an empty directory (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> OpchartResult<()> {
        self.write()?.add_dirs(path.as_ref());
        Ok(())
    }

    /// A file's content, if present (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> OpchartResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> OpchartResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

fn not_found(path: &Path, operation: &str) -> opchart_core::error::OpchartError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: No such file or directory", operation),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> OpchartResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to create directory: a file exists at this path".into(),
            }
            .into());
        }
        inner.add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> OpchartResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if !inner.parent_exists(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> OpchartResult<Vec<u8>> {
        let inner = self.read()?;
        if inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read file: Is a directory".into(),
            }
            .into());
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "read file"))
    }

    fn list_dir(&self, path: &Path) -> OpchartResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "read directory"));
        }

        let children = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect::<BTreeSet<_>>();
        Ok(children.into_iter().collect())
    }

    fn walk_files(&self, root: &Path) -> OpchartResult<Vec<PathBuf>> {
        let inner = self.read()?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .cloned()
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> OpchartResult<()> {
        let mut inner = self.write()?;
        if !inner.parent_exists(to) {
            return Err(not_found(to, "move file"));
        }
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| not_found(from, "move file"))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> OpchartResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path, "remove file"))
    }

    fn kind(&self, path: &Path) -> OpchartResult<EntryKind> {
        let inner = self.read()?;
        if inner.directories.contains(path) {
            Ok(EntryKind::Directory)
        } else if inner.files.contains_key(path) {
            Ok(EntryKind::File)
        } else {
            Err(not_found(path, "stat"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.yaml"), b"x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.yaml"), b"x").unwrap();
        assert_eq!(fs.contents("/a/b.yaml"), Some(b"x".to_vec()));
    }

    #[test]
    fn list_dir_returns_sorted_direct_children() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/s/b.yaml", "").unwrap();
        fs.add_file("/s/a.yaml", "").unwrap();
        fs.add_file("/s/sub/deep.yaml", "").unwrap();

        assert_eq!(
            fs.list_dir(Path::new("/s")).unwrap(),
            ["a.yaml", "b.yaml", "sub"]
        );
    }

    #[test]
    fn walk_files_lists_nested_files_only() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/t/x.yaml", "").unwrap();
        fs.add_file("/t/n/y.yaml", "").unwrap();
        fs.add_file("/other/z.yaml", "").unwrap();
        fs.add_dir("/t/empty").unwrap();

        assert_eq!(
            fs.walk_files(Path::new("/t")).unwrap(),
            [PathBuf::from("/t/n/y.yaml"), PathBuf::from("/t/x.yaml")]
        );
        assert!(fs.walk_files(Path::new("/absent")).unwrap().is_empty());
    }

    #[test]
    fn rename_moves_content() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/t/a.yaml", "a").unwrap();
        fs.add_dir("/c").unwrap();

        fs.rename(Path::new("/t/a.yaml"), Path::new("/c/a.yaml"))
            .unwrap();

        assert_eq!(fs.contents("/t/a.yaml"), None);
        assert_eq!(fs.contents("/c/a.yaml"), Some(b"a".to_vec()));
    }

    #[test]
    fn remove_file_forgets_content() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/t/rendered.yaml", "x").unwrap();

        fs.remove_file(Path::new("/t/rendered.yaml")).unwrap();

        assert_eq!(fs.contents("/t/rendered.yaml"), None);
        assert!(fs.remove_file(Path::new("/t/rendered.yaml")).is_err());
    }

    #[test]
    fn kind_reports_missing_paths() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/config.yaml", "").unwrap();

        assert_eq!(fs.kind(Path::new("/p/config.yaml")).unwrap(), EntryKind::File);
        assert_eq!(fs.kind(Path::new("/p")).unwrap(), EntryKind::Directory);
        assert!(fs.kind(Path::new("/p/absent")).is_err());
    }
}
