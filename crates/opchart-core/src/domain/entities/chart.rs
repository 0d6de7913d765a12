//! Chart naming, on-disk layout, metadata, and the assembly plan.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    manifest::{ManifestClass, classify_file_name},
};

pub const CHARTS_DIR: &str = "charts";
pub const TEMPLATES_DIR: &str = "templates";
pub const CRDS_DIR: &str = "crds";
pub const CHART_FILE: &str = "Chart.yaml";
/// Aggregate file holding the rendered stream.
pub const RENDERED_FILE: &str = "rendered.yaml";
pub const CHART_API_VERSION: &str = "v2";

// ── ChartName ────────────────────────────────────────────────────────────────

/// The directory name of a chart: the last `/`-separated segment of the
/// name the caller asked for (`example.com/my-operator` → `my-operator`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartName(String);

impl ChartName {
    pub fn from_qualified(name: &str) -> Result<Self, DomainError> {
        let leaf = name.rsplit('/').next().unwrap_or(name);

        let reason = if leaf.is_empty() {
            Some("the last path segment is empty")
        } else if leaf == "." || leaf == ".." {
            Some("the last path segment cannot be '.' or '..'")
        } else if leaf.contains('\\') {
            Some("the last path segment cannot contain '\\'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidChartName {
                name: name.into(),
                reason: reason.into(),
            }),
            None => Ok(Self(leaf.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ChartLayout ──────────────────────────────────────────────────────────────

/// Paths of one chart under `<project>/charts/<name>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    root: PathBuf,
}

impl ChartLayout {
    pub fn new(project_root: &Path, name: &ChartName) -> Self {
        Self {
            root: project_root.join(CHARTS_DIR).join(name.as_str()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn crds_dir(&self) -> PathBuf {
        self.root.join(CRDS_DIR)
    }

    pub fn chart_file(&self) -> PathBuf {
        self.root.join(CHART_FILE)
    }

    /// Final location of a manifest file of the given class.
    pub fn destination(&self, class: ManifestClass, file_name: &str) -> PathBuf {
        match class {
            ManifestClass::Template => self.templates_dir().join(file_name),
            ManifestClass::CustomResourceDefinition => self.crds_dir().join(file_name),
        }
    }
}

// ── ChartMetadata ────────────────────────────────────────────────────────────

/// Contents of `Chart.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub api_version: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub chart_type: String,
}

impl ChartMetadata {
    /// The version string is taken verbatim.
    pub fn new(name: &ChartName, version: impl Into<String>) -> Self {
        Self {
            api_version: CHART_API_VERSION.into(),
            name: name.to_string(),
            version: version.into(),
            description: Some(format!("Chart for the {name} operator")),
            chart_type: "application".into(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

// ── ChartPlan ────────────────────────────────────────────────────────────────

/// A file produced by this build, already routed to its final directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub class: ManifestClass,
    pub content: Vec<u8>,
}

/// A file found under `templates/` that has to move to `crds/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Everything a build will do to the chart directory, computed up front.
///
/// Materializing runs directories, then moves, then removals, then writes, so
/// a freshly rendered file always wins over a stale one with the same name.
#[derive(Debug, Clone)]
pub struct ChartPlan {
    layout: ChartLayout,
    files: Vec<PlannedFile>,
    moves: Vec<PlannedMove>,
    removals: Vec<PathBuf>,
}

impl ChartPlan {
    /// Route new files and pre-existing `templates/` files by file name.
    ///
    /// `rendered` pairs file names with contents; `existing` lists files
    /// currently under `templates/` (any depth). An existing
    /// `templates/rendered.yaml` that this build does not produce is removed,
    /// otherwise its documents would ship next to their split copies.
    pub fn assemble(
        layout: ChartLayout,
        rendered: Vec<(String, Vec<u8>)>,
        existing: &[PathBuf],
    ) -> Self {
        let files: Vec<PlannedFile> = rendered
            .into_iter()
            .map(|(file_name, content)| {
                let class = classify_file_name(&file_name);
                PlannedFile {
                    path: layout.destination(class, &file_name),
                    class,
                    content,
                }
            })
            .collect();

        let moves = existing
            .iter()
            .filter_map(|path| {
                let file_name = path.file_name()?.to_str()?;
                match classify_file_name(file_name) {
                    ManifestClass::CustomResourceDefinition => Some(PlannedMove {
                        from: path.clone(),
                        to: layout.crds_dir().join(file_name),
                    }),
                    ManifestClass::Template => None,
                }
            })
            .collect();

        let aggregate = layout.templates_dir().join(RENDERED_FILE);
        let rewritten = files.iter().any(|f| f.path == aggregate);
        let removals = if existing.contains(&aggregate) && !rewritten {
            vec![aggregate]
        } else {
            Vec::new()
        };

        Self {
            layout,
            files,
            moves,
            removals,
        }
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn directories(&self) -> [PathBuf; 2] {
        [self.layout.templates_dir(), self.layout.crds_dir()]
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn moves(&self) -> &[PlannedMove] {
        &self.moves
    }

    /// Stale files deleted before the new ones are written.
    pub fn removals(&self) -> &[PathBuf] {
        &self.removals
    }

    pub fn crd_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.class == ManifestClass::CustomResourceDefinition)
            .count()
            + self.moves.len()
    }
}
