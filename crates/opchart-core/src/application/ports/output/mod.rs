//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `opchart-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::RenderedManifests;
use crate::error::OpchartResult;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `opchart_adapters::filesystem::LocalFilesystem` (production)
/// - `opchart_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Failures are reported as `ApplicationError::FilesystemError` naming the
/// path involved.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> OpchartResult<()>;

    /// Create or truncate a file and write `content` to it.
    fn write_file(&self, path: &Path, content: &[u8]) -> OpchartResult<()>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> OpchartResult<Vec<u8>>;

    /// Names of the direct entries of a directory, sorted by name.
    fn list_dir(&self, path: &Path) -> OpchartResult<Vec<String>>;

    /// Every regular file below `root`, at any depth, sorted by path.
    ///
    /// A missing `root` yields an empty list.
    fn walk_files(&self, root: &Path) -> OpchartResult<Vec<PathBuf>>;

    /// Move a file, replacing the destination if it exists.
    fn rename(&self, from: &Path, to: &Path) -> OpchartResult<()>;

    /// Delete a single file.
    fn remove_file(&self, path: &Path) -> OpchartResult<()>;

    /// Stat a path.
    fn kind(&self, path: &Path) -> OpchartResult<EntryKind>;
}

/// Port for overlay rendering.
///
/// Implemented by:
/// - `opchart_adapters::renderer::KustomizeRenderer` (runs an external binary)
/// - `opchart_adapters::renderer::StaticRenderer` (fixed output, testing)
#[cfg_attr(test, mockall::automock)]
pub trait ManifestRenderer: Send + Sync {
    /// Render the overlay in `overlay_dir` into one concatenated YAML stream.
    ///
    /// Either the complete stream or an error; never partial output.
    fn render(&self, overlay_dir: &Path) -> OpchartResult<RenderedManifests>;
}

/// Port for asking the user one question.
///
/// Implemented by:
/// - `opchart_cli::prompt::TerminalPrompter` (interactive)
/// - `opchart_adapters::prompt::ScriptedPrompter` (canned answers)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Show `question` and return the raw answer line.
    fn ask(&self, question: &str) -> OpchartResult<String>;
}
