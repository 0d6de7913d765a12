//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use opchart_core::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    error::{OpchartError, OpchartResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> OpchartResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> OpchartResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> OpchartResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn list_dir(&self, path: &Path) -> OpchartResult<Vec<String>> {
        let entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut names = entries
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .map_err(|e| map_io_error(path, e, "read directory entry"))
            })
            .collect::<OpchartResult<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    fn walk_files(&self, root: &Path) -> OpchartResult<Vec<PathBuf>> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                OpchartError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {}", e),
                })
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn rename(&self, from: &Path, to: &Path) -> OpchartResult<()> {
        std::fs::rename(from, to).map_err(|e| {
            ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: format!("Failed to move to {}: {}", to.display(), e),
            }
            .into()
        })
    }

    fn remove_file(&self, path: &Path) -> OpchartResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn kind(&self, path: &Path) -> OpchartResult<EntryKind> {
        let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e, "stat"))?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        })
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> OpchartError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
