//! Project Service - the facade callers drive.
//!
//! Parses a project from disk and exposes the operations that run against
//! it. The build and default-CR use cases are delegated to their own
//! services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, BuildOptions, ChartService, DefaultCrService,
        ports::{EntryKind, Filesystem, ManifestRenderer, Prompter},
    },
    domain::Project,
    error::OpchartResult,
};

/// Entry point for everything a caller does with a project.
pub struct ProjectService {
    filesystem: Arc<dyn Filesystem>,
    charts: ChartService,
    default_crs: DefaultCrService,
}

impl ProjectService {
    /// Create a new project service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use opchart_core::application::{ProjectService, ports::*};
    ///
    /// # fn demo(filesystem: Arc<dyn Filesystem>, renderer: Arc<dyn ManifestRenderer>) {
    /// let service = ProjectService::new(
    ///     filesystem, // impl Filesystem
    ///     renderer,   // impl ManifestRenderer
    /// );
    /// # }
    /// ```
    pub fn new(filesystem: Arc<dyn Filesystem>, renderer: Arc<dyn ManifestRenderer>) -> Self {
        Self {
            charts: ChartService::new(Arc::clone(&filesystem), renderer),
            default_crs: DefaultCrService::new(Arc::clone(&filesystem)),
            filesystem,
        }
    }

    /// Read and parse `<path>/PROJECT`.
    ///
    /// The returned project is bound to the absolute form of `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn parse_project(&self, path: impl AsRef<Path>) -> OpchartResult<Project> {
        let path = path.as_ref();
        let root = std::path::absolute(path).map_err(|e| ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to resolve path: {e}"),
        })?;

        let bytes = self.filesystem.read_file(&Project::descriptor_path(&root))?;
        let project = Project::from_descriptor_bytes(&bytes, root)?;

        info!(
            name = %project.name(),
            layouts = ?project.layouts(),
            "Project parsed"
        );
        Ok(project)
    }

    /// Path of `config.yaml` in the project root; it must exist as a file.
    pub fn config(&self, project: &Project) -> OpchartResult<PathBuf> {
        let path = project.config_path();
        match self.filesystem.kind(&path)? {
            EntryKind::File => Ok(path),
            EntryKind::Directory => Err(ApplicationError::NotAFile { path }.into()),
        }
    }

    /// See [`ChartService::build`].
    pub fn build(
        &self,
        project: &Project,
        name: &str,
        version: &str,
        options: &BuildOptions,
    ) -> OpchartResult<PathBuf> {
        self.charts.build(project, name, version, options)
    }

    /// See [`DefaultCrService::default_cr`].
    pub fn default_cr(&self, project: &Project, prompter: &dyn Prompter) -> OpchartResult<Vec<u8>> {
        self.default_crs.default_cr(project, prompter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockManifestRenderer};
    use crate::domain::DomainError;
    use crate::error::OpchartError;

    const DESCRIPTOR: &[u8] = b"\
domain: example.com
layout:
- go.kubebuilder.io/v4
projectName: my-operator
repo: github.com/example/my-operator
version: \"3\"
";

    fn service(fs: MockFilesystem) -> ProjectService {
        ProjectService::new(Arc::new(fs), Arc::new(MockManifestRenderer::new()))
    }

    fn parsed() -> Project {
        Project::from_descriptor_bytes(DESCRIPTOR, "/op").unwrap()
    }

    #[test]
    fn parse_reads_project_file_at_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .withf(|p| p == Path::new("/op/PROJECT"))
            .times(1)
            .returning(|_| Ok(DESCRIPTOR.to_vec()));

        let project = service(fs).parse_project("/op").unwrap();

        assert_eq!(project.path(), Path::new("/op"));
        assert_eq!(project.full_name(), "example.com/my-operator");
    }

    #[test]
    fn relative_paths_are_made_absolute() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .withf(|p| p.is_absolute() && p.ends_with("my-operator/PROJECT"))
            .times(1)
            .returning(|_| Ok(DESCRIPTOR.to_vec()));

        let project = service(fs).parse_project("my-operator").unwrap();
        assert!(project.path().is_absolute());
    }

    #[test]
    fn missing_project_file_is_an_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Failed to read file: No such file or directory".into(),
            }
            .into())
        });

        let err = service(fs).parse_project("/nowhere").unwrap_err();
        assert!(err.to_string().contains("/nowhere/PROJECT"));
    }

    #[test]
    fn malformed_project_file_is_an_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .returning(|_| Ok(b"layout: [unclosed".to_vec()));

        let err = service(fs).parse_project("/op").unwrap_err();
        assert!(matches!(
            err,
            OpchartError::Domain(DomainError::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn config_returns_path_of_regular_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_kind()
            .withf(|p| p == Path::new("/op/config.yaml"))
            .returning(|_| Ok(EntryKind::File));

        assert_eq!(
            service(fs).config(&parsed()).unwrap(),
            PathBuf::from("/op/config.yaml")
        );
    }

    #[test]
    fn config_rejects_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_kind().returning(|_| Ok(EntryKind::Directory));

        let err = service(fs).config(&parsed()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected file but found directory at /op/config.yaml"
        );
    }

    #[test]
    fn config_reports_missing_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_kind().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Failed to stat: No such file or directory".into(),
            }
            .into())
        });

        assert!(service(fs).config(&parsed()).is_err());
    }
}
