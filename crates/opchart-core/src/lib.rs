//! Opchart Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for turning a
//! kubebuilder operator project into an installable chart, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           opchart-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ProjectService, ChartService,          │
//! │  DefaultCrService)                      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, ManifestRenderer,  │
//! │  Prompter)                              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    opchart-adapters (Infrastructure)    │
//! │ (LocalFilesystem, KustomizeRenderer...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Project, ChartPlan, SampleCandidates)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Build pipeline
//!
//! `build` validates the project layout, renders `config/default` through the
//! [`ManifestRenderer`](application::ports::ManifestRenderer) port, plans the
//! chart tree in memory (CRD files to `crds/`, everything else to
//! `templates/`) and only then materializes it, finishing with `Chart.yaml`.
//!
//! Materialization is best-effort: once the first directory is created there
//! is no rollback. A failing write or move leaves the chart directory partially
//! updated and the returned error names the path that failed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use opchart_core::prelude::*;
//!
//! # fn demo(
//! #     filesystem: std::sync::Arc<dyn Filesystem>,
//! #     renderer: std::sync::Arc<dyn ManifestRenderer>,
//! # ) -> OpchartResult<()> {
//! let service = ProjectService::new(filesystem, renderer);
//! let project = service.parse_project("./my-operator")?;
//! let chart = service.build(&project, "example.com/my-operator", "0.1.0", &BuildOptions::default())?;
//! println!("chart written to {}", chart.display());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildOptions, ChartService, DefaultCrService, ProjectService,
        ports::{EntryKind, Filesystem, ManifestRenderer, Prompter},
    };
    pub use crate::domain::{
        ChartLayout, ChartMetadata, ChartName, ManifestClass, Project, ProjectDescriptor,
        RenderedManifests, SampleCandidates, classify_file_name,
    };
    pub use crate::error::{OpchartError, OpchartResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
