//! Application layer for opchart.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectService, ChartService,
//!   DefaultCrService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All project rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{BuildOptions, ChartService, DefaultCrService, ProjectService};

// Re-export port traits (for adapter implementation)
pub use ports::{EntryKind, Filesystem, ManifestRenderer, Prompter};

pub use error::ApplicationError;
