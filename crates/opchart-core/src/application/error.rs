//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not project
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the ports.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The overlay renderer failed or produced no usable output.
    #[error("could not render manifests: {reason}")]
    RenderingFailed { reason: String },

    /// The kustomization of an overlay is missing or malformed.
    #[error("could not parse kustomization in {path}: {reason}")]
    OverlayInvalid { path: PathBuf, reason: String },

    /// The prompt collaborator could not deliver an answer.
    #[error("could not obtain default CR from user prompt: {reason}")]
    PromptFailed { reason: String },

    /// A path that must be a regular file is a directory.
    #[error("expected file but found directory at {path}")]
    NotAFile { path: PathBuf },

    /// `Chart.yaml` could not be produced.
    #[error("could not generate Chart.yaml file: {reason}")]
    ChartMetadata { reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and that you have write permissions".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Make sure kustomize is installed and on PATH".into(),
                "Try running: kustomize build config/default".into(),
                "Or point opchart at another binary with renderer.program".into(),
            ],
            Self::OverlayInvalid { path, .. } => vec![
                format!("Check the kustomization file in {}", path.display()),
                "Expected one of: kustomization.yaml, kustomization.yml, Kustomization".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run the command in an interactive terminal".into(),
                "Or pass the choice directly with --select".into(),
            ],
            Self::NotAFile { path } => vec![format!(
                "Remove or rename the directory at {}",
                path.display()
            )],
            Self::LockPoisoned => vec!["Try again".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::ChartMetadata { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
            Self::RenderingFailed { .. } => ErrorCategory::Configuration,
            Self::OverlayInvalid { .. } | Self::NotAFile { .. } => ErrorCategory::Validation,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
        }
    }
}
