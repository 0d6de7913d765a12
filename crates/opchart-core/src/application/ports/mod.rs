//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `opchart-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ManifestRenderer`: Overlay rendering (kustomize)
//!   - `Prompter`: One question, one answer
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EntryKind, Filesystem, ManifestRenderer, Prompter};

#[cfg(test)]
pub use output::{MockFilesystem, MockManifestRenderer, MockPrompter};
