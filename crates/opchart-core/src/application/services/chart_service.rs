//! Chart Service - turns a project into a chart directory.
//!
//! This service coordinates the build workflow:
//! 1. Validate layout and chart name
//! 2. Render `config/default`
//! 3. Scan the existing `templates/` and plan the chart tree
//! 4. Materialize the plan and write `Chart.yaml`
//!
//! Nothing is written before step 4. Step 4 does not roll back: a failure
//! there leaves whatever was already created or moved on disk.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestRenderer},
    },
    domain::{
        ChartLayout, ChartMetadata, ChartPlan, DomainValidator as validator, Project,
        RENDERED_FILE, RenderedManifests,
    },
    error::OpchartResult,
};

/// Knobs for a single build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Write one file per rendered document next to `rendered.yaml`.
    pub split_documents: bool,
}

/// Builds charts from projects.
pub struct ChartService {
    filesystem: Arc<dyn Filesystem>,
    renderer: Arc<dyn ManifestRenderer>,
}

impl ChartService {
    pub fn new(filesystem: Arc<dyn Filesystem>, renderer: Arc<dyn ManifestRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Build `<project>/charts/<last segment of name>/` and return its path.
    #[instrument(
        skip_all,
        fields(
            project = %project.name(),
            chart = %name,
            version = %version,
            split = options.split_documents
        )
    )]
    pub fn build(
        &self,
        project: &Project,
        name: &str,
        version: &str,
        options: &BuildOptions,
    ) -> OpchartResult<PathBuf> {
        // 1. Validate
        validator::validate_layout(project)?;
        let chart_name = validator::validate_chart_name(name)?;
        let layout = ChartLayout::new(project.path(), &chart_name);

        let chart_yaml = ChartMetadata::new(&chart_name, version)
            .to_yaml()
            .map_err(|e| ApplicationError::ChartMetadata {
                reason: e.to_string(),
            })?;

        // 2. Render
        let overlay = project.overlay_dir();
        info!(overlay = %overlay.display(), "Rendering overlay");
        let rendered = self.renderer.render(&overlay)?;
        debug!(bytes = rendered.len(), "Overlay rendered");

        // 3. Plan
        let files = rendered_files(rendered, options)?;
        let existing = self.filesystem.walk_files(&layout.templates_dir())?;
        let plan = ChartPlan::assemble(layout, files, &existing);
        info!(
            files = plan.files().len(),
            moves = plan.moves().len(),
            removals = plan.removals().len(),
            crds = plan.crd_count(),
            "Chart planned"
        );

        // 4. Materialize
        self.materialize(&plan)?;

        let chart_file = plan.layout().chart_file();
        self.filesystem
            .write_file(&chart_file, chart_yaml.as_bytes())
            .map_err(|e| ApplicationError::ChartMetadata {
                reason: e.to_string(),
            })?;

        let root = plan.layout().root().to_path_buf();
        info!(chart = %root.display(), "Chart built");
        Ok(root)
    }

    /// Directories, moves, removals, then writes. Stops at the first failure.
    fn materialize(&self, plan: &ChartPlan) -> OpchartResult<()> {
        for dir in plan.directories() {
            self.filesystem.create_dir_all(&dir)?;
        }

        for mv in plan.moves() {
            debug!(from = %mv.from.display(), to = %mv.to.display(), "Moving CRD");
            self.filesystem.rename(&mv.from, &mv.to)?;
        }

        for stale in plan.removals() {
            debug!(path = %stale.display(), "Removing stale manifest");
            self.filesystem.remove_file(stale)?;
        }

        for file in plan.files() {
            debug!(path = %file.path.display(), class = file.class.as_str(), "Writing manifest");
            self.filesystem.write_file(&file.path, &file.content)?;
        }

        Ok(())
    }
}

/// Name the files a rendered stream turns into.
fn rendered_files(
    rendered: RenderedManifests,
    options: &BuildOptions,
) -> OpchartResult<Vec<(String, Vec<u8>)>> {
    if !options.split_documents {
        return Ok(vec![(RENDERED_FILE.to_string(), rendered.into_bytes())]);
    }

    let mut named = Vec::new();
    let mut leftover: Vec<String> = Vec::new();

    for doc in rendered.documents()? {
        match doc.file_name() {
            Some(file_name) => named.push((file_name.to_string(), doc.content().as_bytes().to_vec())),
            None => leftover.push(doc.content().to_string()),
        }
    }

    let mut files = Vec::with_capacity(named.len() + 1);
    if !leftover.is_empty() {
        files.push((RENDERED_FILE.to_string(), leftover.join("---\n").into_bytes()));
    }
    files.extend(named);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use mockall::Sequence;

    use super::*;
    use crate::application::ports::{MockFilesystem, MockManifestRenderer};
    use crate::domain::DomainError;
    use crate::error::OpchartError;

    const STREAM: &str = "\
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: memcacheds.cache.example.com
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: op-controller-manager
";

    type Written = Arc<Mutex<Vec<(PathBuf, Vec<u8>)>>>;

    fn project(layout: &str) -> Project {
        let descriptor = format!("layout:\n- {layout}\nprojectName: op\ndomain: example.com\n");
        Project::from_descriptor_bytes(descriptor.as_bytes(), "/op").unwrap()
    }

    fn renderer_returning(stream: &'static str) -> MockManifestRenderer {
        let mut renderer = MockManifestRenderer::new();
        renderer
            .expect_render()
            .returning(move |_| Ok(RenderedManifests::new(stream)));
        renderer
    }

    fn recording_filesystem(existing: Vec<PathBuf>) -> (MockFilesystem, Written) {
        let written: Written = Arc::default();
        let mut fs = MockFilesystem::new();
        fs.expect_walk_files()
            .returning(move |_| Ok(existing.clone()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_rename().returning(|_, _| Ok(()));
        let sink = Arc::clone(&written);
        fs.expect_write_file().returning(move |path, content| {
            sink.lock()
                .unwrap()
                .push((path.to_path_buf(), content.to_vec()));
            Ok(())
        });
        (fs, written)
    }

    fn service(fs: MockFilesystem, renderer: MockManifestRenderer) -> ChartService {
        ChartService::new(Arc::new(fs), Arc::new(renderer))
    }

    fn written_paths(written: &Written) -> Vec<PathBuf> {
        written.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    #[test]
    fn unsupported_layout_touches_nothing() {
        // Mocks without expectations panic on any call.
        let svc = service(MockFilesystem::new(), MockManifestRenderer::new());

        let err = svc
            .build(
                &project("go.kubebuilder.io/v2"),
                "example.com/op",
                "0.1.0",
                &BuildOptions::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            OpchartError::Domain(DomainError::UnsupportedLayout { .. })
        ));
        assert!(err.to_string().contains("go.kubebuilder.io/v2"));
    }

    #[test]
    fn bad_chart_name_fails_before_rendering() {
        let svc = service(MockFilesystem::new(), MockManifestRenderer::new());

        let err = svc
            .build(
                &project("go.kubebuilder.io/v3"),
                "example.com/",
                "0.1.0",
                &BuildOptions::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            OpchartError::Domain(DomainError::InvalidChartName { .. })
        ));
    }

    #[test]
    fn render_failure_writes_nothing() {
        let mut renderer = MockManifestRenderer::new();
        renderer.expect_render().times(1).returning(|_| {
            Err(ApplicationError::RenderingFailed {
                reason: "kustomize: not found".into(),
            }
            .into())
        });
        let svc = service(MockFilesystem::new(), renderer);

        let err = svc
            .build(
                &project("go.kubebuilder.io/v4"),
                "op",
                "0.1.0",
                &BuildOptions::default(),
            )
            .unwrap_err();

        assert!(err.to_string().contains("kustomize: not found"));
    }

    #[test]
    fn plan_completes_before_first_write() {
        let mut seq = Sequence::new();
        let stale_crd = PathBuf::from("/op/charts/op/templates/old/x_customresourcedefinition_y.yaml");

        let mut renderer = MockManifestRenderer::new();
        renderer
            .expect_render()
            .withf(|dir| dir == Path::new("/op/config/default"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RenderedManifests::new(STREAM)));

        let mut fs = MockFilesystem::new();
        let listed = stale_crd.clone();
        fs.expect_walk_files()
            .withf(|root| root == Path::new("/op/charts/op/templates"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(vec![listed.clone()]));
        fs.expect_create_dir_all()
            .withf(|dir| dir == Path::new("/op/charts/op/templates"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all()
            .withf(|dir| dir == Path::new("/op/charts/op/crds"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_rename()
            .withf(move |from, to| {
                from == stale_crd.as_path()
                    && to == Path::new("/op/charts/op/crds/x_customresourcedefinition_y.yaml")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/op/charts/op/templates/rendered.yaml")
                    && content == STREAM.as_bytes()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path == Path::new("/op/charts/op/Chart.yaml"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let root = service(fs, renderer)
            .build(
                &project("go.kubebuilder.io/v3"),
                "example.com/op",
                "0.1.0",
                &BuildOptions::default(),
            )
            .unwrap();

        assert_eq!(root, PathBuf::from("/op/charts/op"));
    }

    #[test]
    fn chart_yaml_carries_name_and_version() {
        let (fs, written) = recording_filesystem(vec![]);
        service(fs, renderer_returning(STREAM))
            .build(
                &project("go.kubebuilder.io/v4-alpha"),
                "example.com/op",
                "1.4.0-rc.2",
                &BuildOptions::default(),
            )
            .unwrap();

        let written = written.lock().unwrap();
        let (path, content) = written.last().unwrap();
        assert_eq!(path, Path::new("/op/charts/op/Chart.yaml"));
        let metadata: ChartMetadata = serde_yaml::from_slice(content).unwrap();
        assert_eq!(metadata.name, "op");
        assert_eq!(metadata.version, "1.4.0-rc.2");
        assert_eq!(metadata.api_version, "v2");
    }

    #[test]
    fn split_documents_routes_crds_to_crds_dir() {
        let (fs, written) = recording_filesystem(vec![]);
        service(fs, renderer_returning(STREAM))
            .build(
                &project("go.kubebuilder.io/v4"),
                "op",
                "0.1.0",
                &BuildOptions {
                    split_documents: true,
                },
            )
            .unwrap();

        assert_eq!(
            written_paths(&written),
            [
                PathBuf::from(
                    "/op/charts/op/crds/apiextensions.k8s.io_v1_customresourcedefinition_memcacheds.cache.example.com.yaml"
                ),
                PathBuf::from("/op/charts/op/templates/apps_v1_deployment_op-controller-manager.yaml"),
                PathBuf::from("/op/charts/op/Chart.yaml"),
            ]
        );
    }

    #[test]
    fn split_documents_keeps_anonymous_documents_in_rendered_file() {
        const MIXED: &str = "kind: List\nitems: []\n---\napiVersion: v1\nkind: Namespace\nmetadata:\n  name: op-system\n---\nfoo: bar\n";
        let (fs, written) = recording_filesystem(vec![]);
        service(fs, renderer_returning(MIXED))
            .build(
                &project("go.kubebuilder.io/v4"),
                "op",
                "0.1.0",
                &BuildOptions {
                    split_documents: true,
                },
            )
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].0, PathBuf::from("/op/charts/op/templates/rendered.yaml"));
        assert_eq!(written[0].1, b"kind: List\nitems: []\n---\nfoo: bar\n".to_vec());
        assert_eq!(
            written[1].0,
            PathBuf::from("/op/charts/op/templates/v1_namespace_op-system.yaml")
        );
    }

    #[test]
    fn failed_write_names_path_and_skips_chart_yaml() {
        let mut fs = MockFilesystem::new();
        fs.expect_walk_files().returning(|_| Ok(vec![]));
        fs.expect_create_dir_all().times(2).returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to write file: disk full".into(),
            }
            .into())
        });

        let err = service(fs, renderer_returning(STREAM))
            .build(
                &project("go.kubebuilder.io/v3"),
                "op",
                "0.1.0",
                &BuildOptions::default(),
            )
            .unwrap_err();

        assert!(
            err.to_string()
                .contains("/op/charts/op/templates/rendered.yaml")
        );
    }

    #[test]
    fn split_build_removes_previous_aggregate() {
        let stale = PathBuf::from("/op/charts/op/templates/rendered.yaml");
        let (mut fs, written) = recording_filesystem(vec![stale.clone()]);
        let removed = stale.clone();
        fs.expect_remove_file()
            .withf(move |path| path == removed.as_path())
            .times(1)
            .returning(|_| Ok(()));

        service(fs, renderer_returning(STREAM))
            .build(
                &project("go.kubebuilder.io/v4"),
                "op",
                "0.1.0",
                &BuildOptions {
                    split_documents: true,
                },
            )
            .unwrap();

        assert!(!written_paths(&written).contains(&stale));
    }
}
