//! End-to-end runs of the project service against a real directory tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use opchart_adapters::{LocalFilesystem, MemoryFilesystem, ScriptedPrompter, StaticRenderer};
use opchart_core::prelude::*;
use tempfile::TempDir;

const DESCRIPTOR: &str = "\
domain: example.com
layout:
- go.kubebuilder.io/v4
projectName: my-operator
repo: github.com/example/my-operator
resources:
- group: cache
  domain: example.com
  kind: Memcached
  version: v1alpha1
version: \"3\"
";

const STREAM: &str = "\
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: memcacheds.cache.example.com
---
apiVersion: v1
kind: ServiceAccount
metadata:
  name: my-operator-controller-manager
  namespace: my-operator-system
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: my-operator-controller-manager
  namespace: my-operator-system
";

struct Fixture {
    dir: TempDir,
    renderer: Arc<StaticRenderer>,
    service: ProjectService,
}

impl Fixture {
    fn new(descriptor: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("PROJECT"), descriptor).unwrap();
        fs::create_dir_all(dir.path().join("config/default")).unwrap();
        fs::create_dir_all(dir.path().join("config/samples")).unwrap();

        let renderer = Arc::new(StaticRenderer::new(STREAM));
        let service = ProjectService::new(Arc::new(LocalFilesystem::new()), renderer.clone());
        Self {
            dir,
            renderer,
            service,
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn project(&self) -> Project {
        self.service.parse_project(self.root()).unwrap()
    }

    fn chart(&self) -> PathBuf {
        self.root().join("charts/my-operator")
    }

    fn build(&self, options: &BuildOptions) -> OpchartResult<PathBuf> {
        self.service
            .build(&self.project(), "example.com/my-operator", "0.1.0", options)
    }

    fn sample(&self, name: &str, content: &str) {
        fs::write(self.root().join("config/samples").join(name), content).unwrap();
    }

    fn default_cr(&self, prompter: &ScriptedPrompter) -> OpchartResult<Vec<u8>> {
        self.service.default_cr(&self.project(), prompter)
    }
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = walkdir(dir)
        .into_iter()
        .map(|p| {
            p.strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    names.sort();
    names
}

fn walkdir(dir: &Path) -> Vec<PathBuf> {
    LocalFilesystem::new().walk_files(dir).unwrap()
}

// ============================================================================
// Project facade
// ============================================================================

#[test]
fn parse_exposes_descriptor_fields() {
    let fx = Fixture::new(DESCRIPTOR);
    let project = fx.project();

    assert_eq!(project.name(), "my-operator");
    assert_eq!(project.full_name(), "example.com/my-operator");
    assert_eq!(project.repo(), Some("github.com/example/my-operator"));
    assert_eq!(project.version(), Some("3"));
    assert_eq!(project.resources()[0].kind, "Memcached");
    assert_eq!(project.path(), fx.root());
}

#[test]
fn full_name_without_domain_is_plain_name() {
    let fx = Fixture::new("layout:\n- go.kubebuilder.io/v3\nprojectName: my-operator\ndomain: \"\"\n");
    assert_eq!(fx.project().full_name(), "my-operator");
}

#[test]
fn missing_project_file_fails() {
    let dir = TempDir::new().unwrap();
    let service = ProjectService::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(StaticRenderer::new("")),
    );
    let err = service.parse_project(dir.path()).unwrap_err();
    assert!(err.to_string().contains("PROJECT"));
}

#[test]
fn config_requires_a_regular_file() {
    let fx = Fixture::new(DESCRIPTOR);
    let project = fx.project();

    assert!(fx.service.config(&project).is_err());

    fs::write(fx.root().join("config.yaml"), "").unwrap();
    assert_eq!(
        fx.service.config(&project).unwrap(),
        fx.root().join("config.yaml")
    );

    fs::remove_file(fx.root().join("config.yaml")).unwrap();
    fs::create_dir(fx.root().join("config.yaml")).unwrap();
    let err = fx.service.config(&project).unwrap_err();
    assert!(err.to_string().starts_with("expected file but found directory"));
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn build_writes_chart_tree() {
    let fx = Fixture::new(DESCRIPTOR);
    let chart = fx.build(&BuildOptions::default()).unwrap();

    assert_eq!(chart, fx.chart());
    assert_eq!(fx.renderer.calls(), [fx.root().join("config/default")]);
    assert_eq!(
        fs::read(chart.join("templates/rendered.yaml")).unwrap(),
        STREAM.as_bytes()
    );
    assert!(chart.join("crds").is_dir());

    let metadata: ChartMetadata =
        serde_yaml::from_slice(&fs::read(chart.join("Chart.yaml")).unwrap()).unwrap();
    assert_eq!(metadata.name, "my-operator");
    assert_eq!(metadata.version, "0.1.0");
}

#[test]
fn build_is_idempotent() {
    let fx = Fixture::new(DESCRIPTOR);
    let options = BuildOptions {
        split_documents: true,
    };

    fx.build(&options).unwrap();
    let first_tree = names_in(&fx.chart());
    let first_rendered = fs::read(fx.chart().join("crds/apiextensions.k8s.io_v1_customresourcedefinition_memcacheds.cache.example.com.yaml")).unwrap();

    fx.build(&options).unwrap();
    assert_eq!(names_in(&fx.chart()), first_tree);
    assert_eq!(
        fs::read(fx.chart().join("crds/apiextensions.k8s.io_v1_customresourcedefinition_memcacheds.cache.example.com.yaml")).unwrap(),
        first_rendered
    );

    fx.build(&BuildOptions::default()).unwrap();
    let aggregate = fs::read(fx.chart().join("templates/rendered.yaml")).unwrap();
    fx.build(&BuildOptions::default()).unwrap();
    assert_eq!(
        fs::read(fx.chart().join("templates/rendered.yaml")).unwrap(),
        aggregate
    );
}

#[test]
fn split_build_replaces_earlier_aggregate() {
    let fx = Fixture::new(DESCRIPTOR);
    fx.build(&BuildOptions::default()).unwrap();
    assert!(fx.chart().join("templates/rendered.yaml").is_file());

    fx.build(&BuildOptions {
        split_documents: true,
    })
    .unwrap();

    assert_eq!(
        names_in(&fx.chart().join("templates")),
        [
            "apps_v1_deployment_my-operator-controller-manager.yaml",
            "v1_serviceaccount_my-operator-controller-manager.yaml",
        ]
    );
    let shipped_crds = walkdir(&fx.chart())
        .into_iter()
        .filter(|p| {
            fs::read_to_string(p)
                .unwrap()
                .contains("kind: CustomResourceDefinition")
        })
        .count();
    assert_eq!(shipped_crds, 1);
}

#[test]
fn existing_templates_are_partitioned_by_marker() {
    let fx = Fixture::new(DESCRIPTOR);
    let templates = fx.chart().join("templates");
    fs::create_dir_all(templates.join("nested/deep")).unwrap();
    // N = 5, K = 2
    for name in [
        "apps_v1_deployment_manager.yaml",
        "v1_service_metrics.yaml",
        "rbac.authorization.k8s.io_v1_role_leader.yaml",
        "apiextensions.k8s.io_v1_customresourcedefinition_a.yaml",
        "nested/deep/apiextensions.k8s.io_v1_customresourcedefinition_b.yaml",
    ] {
        fs::write(templates.join(name), name).unwrap();
    }

    fx.build(&BuildOptions::default()).unwrap();

    assert_eq!(
        names_in(&fx.chart().join("crds")),
        [
            "apiextensions.k8s.io_v1_customresourcedefinition_a.yaml",
            "apiextensions.k8s.io_v1_customresourcedefinition_b.yaml",
        ]
    );
    assert_eq!(
        names_in(&templates),
        [
            "apps_v1_deployment_manager.yaml",
            "rbac.authorization.k8s.io_v1_role_leader.yaml",
            "rendered.yaml",
            "v1_service_metrics.yaml",
        ]
    );
    // moved files keep their content
    assert_eq!(
        fs::read_to_string(
            fx.chart()
                .join("crds/apiextensions.k8s.io_v1_customresourcedefinition_b.yaml")
        )
        .unwrap(),
        "nested/deep/apiextensions.k8s.io_v1_customresourcedefinition_b.yaml"
    );
}

#[test]
fn unsupported_layout_leaves_project_untouched() {
    let fx = Fixture::new("layout:\n- go.kubebuilder.io/v2\nprojectName: my-operator\n");
    fx.sample("a.yaml", "kind: A\n");
    let prompter = ScriptedPrompter::new(["1"]);

    let err = fx.build(&BuildOptions::default()).unwrap_err();
    assert!(err.to_string().contains("is not supported"));
    assert!(!fx.root().join("charts").exists());
    assert!(fx.renderer.calls().is_empty());

    assert!(fx.default_cr(&prompter).is_err());
    assert!(prompter.questions().is_empty());
}

// ============================================================================
// Default CR
// ============================================================================

#[test]
fn single_sample_is_returned_without_prompt() {
    let fx = Fixture::new(DESCRIPTOR);
    fx.sample("cache_v1alpha1_memcached.yaml", "kind: Memcached\n");
    let prompter = ScriptedPrompter::new(Vec::<String>::new());

    assert_eq!(fx.default_cr(&prompter).unwrap(), b"kind: Memcached\n");
    assert!(prompter.questions().is_empty());
}

#[test]
fn three_samples_follow_the_answer() {
    let fx = Fixture::new(DESCRIPTOR);
    for (name, kind) in [("a.yaml", "A"), ("b.yaml", "B"), ("c.yaml", "C")] {
        fx.sample(name, &format!("kind: {kind}\n"));
    }

    let cases: [(&str, Result<&[u8], &str>); 4] = [
        ("", Ok(b"kind: A\n")),
        ("2", Ok(b"kind: B\n")),
        ("9", Err("invalid input [9] for CR selection")),
        ("abc", Err("cannot parse \"abc\"")),
    ];

    for (answer, expected) in cases {
        let prompter = ScriptedPrompter::new([answer]);
        let result = fx.default_cr(&prompter);
        match expected {
            Ok(bytes) => assert_eq!(result.unwrap(), bytes, "answer {answer:?}"),
            Err(message) => assert!(
                result.unwrap_err().to_string().contains(message),
                "answer {answer:?}"
            ),
        }
        assert_eq!(prompter.questions().len(), 1);
    }
}

#[test]
fn empty_samples_directory_fails_without_prompt() {
    let fx = Fixture::new(DESCRIPTOR);
    let prompter = ScriptedPrompter::new(["1"]);

    let err = fx.default_cr(&prompter).unwrap_err();
    assert!(err.to_string().starts_with("no default CR available"));
    assert!(prompter.questions().is_empty());
}

#[test]
fn samples_are_rescanned_on_every_call() {
    let fx = Fixture::new(DESCRIPTOR);
    fx.sample("a.yaml", "kind: A\n");
    let none = ScriptedPrompter::new(Vec::<String>::new());
    assert_eq!(fx.default_cr(&none).unwrap(), b"kind: A\n");

    fx.sample("b.yaml", "kind: B\n");
    let prompter = ScriptedPrompter::new(["2"]);
    assert_eq!(fx.default_cr(&prompter).unwrap(), b"kind: B\n");
}

// ============================================================================
// In-memory run
// ============================================================================

#[test]
fn memory_filesystem_runs_the_same_pipeline() {
    let memory = MemoryFilesystem::new();
    memory.add_file("/op/PROJECT", DESCRIPTOR).unwrap();
    memory
        .add_file("/op/charts/my-operator/templates/x_customresourcedefinition_y.yaml", "crd")
        .unwrap();

    let service = ProjectService::new(
        Arc::new(memory.clone()),
        Arc::new(StaticRenderer::new(STREAM)),
    );
    let project = service.parse_project("/op").unwrap();
    service
        .build(&project, "my-operator", "2.0.0", &BuildOptions::default())
        .unwrap();

    assert_eq!(
        memory.list_files(),
        [
            PathBuf::from("/op/PROJECT"),
            PathBuf::from("/op/charts/my-operator/Chart.yaml"),
            PathBuf::from("/op/charts/my-operator/crds/x_customresourcedefinition_y.yaml"),
            PathBuf::from("/op/charts/my-operator/templates/rendered.yaml"),
        ]
    );
}
