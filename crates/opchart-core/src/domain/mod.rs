//! Core domain layer for opchart.
//!
//! This module contains pure business logic: what a kubebuilder project looks
//! like, which layouts are supported, where rendered manifests go inside a
//! chart, and how the default custom resource is picked.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or terminal access
//! - **Few external crates**: std, thiserror, serde/serde_yaml for the
//!   descriptor and chart formats
//! - **Immutable entities**: a parsed `Project` is read-only
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod selection;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    chart::{
        CHART_FILE, CHARTS_DIR, CRDS_DIR, ChartLayout, ChartMetadata, ChartName, ChartPlan,
        PlannedFile, PlannedMove, RENDERED_FILE, TEMPLATES_DIR,
    },
    project::{
        CONFIG_FILE, DEFAULT_OVERLAY_DIR, PROJECT_FILE, Project, ProjectDescriptor,
        ResourceDescriptor, SAMPLES_DIR,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use manifest::{
    CRD_FILE_MARKER, ManifestClass, ManifestDocument, RenderedManifests, classify_file_name,
};

pub use selection::{CandidatePrompt, Resolution, SampleCandidates};

pub use validation::DomainValidator;
