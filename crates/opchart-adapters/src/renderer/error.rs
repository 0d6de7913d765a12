//! Failures of the overlay renderer before they reach the core.

use std::io;
use std::path::PathBuf;

use opchart_core::{application::ApplicationError, error::OpchartError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no kustomization file found in {dir}")]
    MissingKustomization { dir: PathBuf },

    #[error("found multiple kustomization files in {dir}: {}", .found.join(", "))]
    AmbiguousKustomization { dir: PathBuf, found: Vec<String> },

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

impl RenderError {
    fn overlay_dir(&self) -> Option<PathBuf> {
        match self {
            Self::MissingKustomization { dir } | Self::AmbiguousKustomization { dir, .. } => {
                Some(dir.clone())
            }
            Self::Read { path, .. } | Self::Malformed { path, .. } => {
                Some(path.parent().map(PathBuf::from).unwrap_or_else(|| path.clone()))
            }
            Self::Spawn { .. } | Self::Failed { .. } => None,
        }
    }
}

impl From<RenderError> for OpchartError {
    fn from(err: RenderError) -> Self {
        match err.overlay_dir() {
            Some(path) => ApplicationError::OverlayInvalid {
                path,
                reason: err.to_string(),
            },
            None => ApplicationError::RenderingFailed {
                reason: err.to_string(),
            },
        }
        .into()
    }
}
