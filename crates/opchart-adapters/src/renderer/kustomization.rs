//! The kustomization file of an overlay directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::RenderError;

/// File names kustomize recognises, in lookup order.
pub const KUSTOMIZATION_FILE_NAMES: &[&str] =
    &["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// The fields of a kustomization opchart looks at.
///
/// Everything else (patches, generators, replacements, ...) is left to the
/// renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name_prefix: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    /// Deprecated by kustomize in favour of `resources`, still common in
    /// older scaffolds.
    #[serde(default)]
    pub bases: Vec<String>,
}

impl Kustomization {
    /// Locate and parse the kustomization file in `dir`.
    pub fn load(dir: &Path) -> Result<Self, RenderError> {
        let path = Self::locate(dir)?;
        let bytes = std::fs::read(&path).map_err(|source| RenderError::Read {
            path: path.clone(),
            source,
        })?;
        serde_yaml::from_slice(&bytes).map_err(|source| RenderError::Malformed { path, source })
    }

    /// Exactly one of [`KUSTOMIZATION_FILE_NAMES`] must exist.
    pub fn locate(dir: &Path) -> Result<PathBuf, RenderError> {
        let found: Vec<&str> = KUSTOMIZATION_FILE_NAMES
            .iter()
            .copied()
            .filter(|name| dir.join(name).is_file())
            .collect();

        match found.as_slice() {
            [] => Err(RenderError::MissingKustomization {
                dir: dir.to_path_buf(),
            }),
            [name] => Ok(dir.join(name)),
            _ => Err(RenderError::AmbiguousKustomization {
                dir: dir.to_path_buf(),
                found: found.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// Every entry the overlay pulls in, `bases` first.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.bases
            .iter()
            .chain(self.resources.iter())
            .map(String::as_str)
    }
}
