// ============================================================================
// domain/error.rs - PROJECT AND SELECTION RULE VIOLATIONS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may keep them around for reporting)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("project layout {layouts:?} is not supported")]
    UnsupportedLayout { layouts: Vec<String> },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("could not parse project file: {reason}")]
    MalformedDescriptor { reason: String },

    #[error("invalid chart name '{name}': {reason}")]
    InvalidChartName { name: String, reason: String },

    #[error("rendered manifests cannot be split into documents: {reason}")]
    InvalidManifestStream { reason: String },

    #[error("could not obtain default CR from user prompt: cannot parse {answer:?}: {reason}")]
    SelectionUnparsable { answer: String, reason: String },

    #[error("could not obtain default CR from user prompt: invalid input [{index}] for CR selection")]
    SelectionOutOfRange { index: i64 },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("no default CR available: samples directory {dir} is empty")]
    NoDefaultCr { dir: PathBuf },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedLayout { layouts } => vec![
                format!("Declared layouts: {}", layouts.join(", ")),
                "Supported layouts:".into(),
                "  • go.kubebuilder.io/v3".into(),
                "  • go.kubebuilder.io/v4-alpha".into(),
                "  • go.kubebuilder.io/v4".into(),
                "Migrate the project with a recent kubebuilder release".into(),
            ],
            Self::MalformedDescriptor { reason } => vec![
                "The PROJECT file is not valid YAML".into(),
                format!("Details: {}", reason),
            ],
            Self::InvalidChartName { name, .. } => vec![
                format!("'{}' does not end in a usable chart name", name),
                "Examples: my-operator, example.com/my-operator".into(),
            ],
            Self::NoDefaultCr { dir } => vec![
                format!("Add a sample custom resource to {}", dir.display()),
                "kubebuilder creates one per API: kubebuilder create api".into(),
            ],
            Self::SelectionUnparsable { .. } | Self::SelectionOutOfRange { .. } => vec![
                "Answer with one of the listed numbers".into(),
                "Press ENTER to take the first option".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedLayout { .. } => ErrorCategory::Compatibility,
            Self::MalformedDescriptor { .. }
            | Self::InvalidChartName { .. }
            | Self::SelectionUnparsable { .. }
            | Self::SelectionOutOfRange { .. } => ErrorCategory::Validation,
            Self::NoDefaultCr { .. } => ErrorCategory::NotFound,
            Self::InvalidManifestStream { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
