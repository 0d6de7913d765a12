//! The kubebuilder project and its `PROJECT` descriptor.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{error::DomainError, layout};

/// Descriptor file kubebuilder keeps at the project root.
pub const PROJECT_FILE: &str = "PROJECT";
/// File whose presence `ProjectService::config` checks.
pub const CONFIG_FILE: &str = "config.yaml";
/// Kustomize overlay rendered into the chart.
pub const DEFAULT_OVERLAY_DIR: &str = "config/default";
/// Directory holding sample custom resources.
pub const SAMPLES_DIR: &str = "config/samples";

/// Deserialised representation of a `PROJECT` file.
///
/// Only the fields the chart pipeline reads are modelled; everything else
/// kubebuilder writes (plugins, cliVersion, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(default, deserialize_with = "string_or_list")]
    pub layout: Vec<String>,

    #[serde(default, rename = "projectName")]
    pub project_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Descriptor format version (`"3"` for current kubebuilder).
    #[serde(
        default,
        deserialize_with = "optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceDescriptor>,
}

/// One API scaffolded with `kubebuilder create api`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ResourceDescriptor {
    /// `group.domain/version`, or just `version` for core-group resources.
    pub fn api_version(&self) -> String {
        let group = match (self.group.as_deref(), self.domain.as_deref()) {
            (Some(g), Some(d)) if !g.is_empty() && !d.is_empty() => format!("{g}.{d}"),
            (Some(g), _) if !g.is_empty() => g.to_string(),
            (_, Some(d)) if !d.is_empty() => d.to_string(),
            _ => String::new(),
        };
        if group.is_empty() {
            self.version.clone()
        } else {
            format!("{group}/{}", self.version)
        }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// A parsed operator project, bound to the directory it was loaded from.
///
/// The root path is fixed at construction; there is no way to rebind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    descriptor: ProjectDescriptor,
    path: PathBuf,
}

impl Project {
    pub fn new(descriptor: ProjectDescriptor, path: impl Into<PathBuf>) -> Self {
        Self {
            descriptor,
            path: path.into(),
        }
    }

    /// Parse the raw contents of a `PROJECT` file.
    pub fn from_descriptor_bytes(
        bytes: &[u8],
        path: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let descriptor: ProjectDescriptor =
            serde_yaml::from_slice(bytes).map_err(|e| DomainError::MalformedDescriptor {
                reason: e.to_string(),
            })?;
        Ok(Self::new(descriptor, path))
    }

    /// Location of the descriptor inside a project directory.
    pub fn descriptor_path(root: &Path) -> PathBuf {
        root.join(PROJECT_FILE)
    }

    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.project_name
    }

    pub fn domain(&self) -> Option<&str> {
        self.descriptor.domain.as_deref().filter(|d| !d.is_empty())
    }

    pub fn repo(&self) -> Option<&str> {
        self.descriptor.repo.as_deref().filter(|r| !r.is_empty())
    }

    pub fn version(&self) -> Option<&str> {
        self.descriptor.version.as_deref()
    }

    pub fn layouts(&self) -> &[String] {
        &self.descriptor.layout
    }

    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.descriptor.resources
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `domain/name` when a domain is declared, otherwise just `name`.
    pub fn full_name(&self) -> String {
        match self.domain() {
            Some(domain) => format!("{}/{}", domain, self.name()),
            None => self.name().to_string(),
        }
    }

    pub fn validate_layout(&self) -> Result<(), DomainError> {
        layout::validate_layouts(self.layouts())
    }

    pub fn config_path(&self) -> PathBuf {
        self.path.join(CONFIG_FILE)
    }

    pub fn overlay_dir(&self) -> PathBuf {
        self.path.join(DEFAULT_OVERLAY_DIR)
    }

    pub fn samples_dir(&self) -> PathBuf {
        self.path.join(SAMPLES_DIR)
    }
}

// ── serde helpers ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => s,
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

// `version: 3` and `version: "3"` both occur in the wild.
fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

// Older descriptors carry a single `layout: go.kubebuilder.io/v3` string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
