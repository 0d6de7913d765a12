//! Infrastructure adapters for opchart.
//!
//! This crate implements the ports defined in `opchart-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod prompt;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompt::ScriptedPrompter;
pub use renderer::{KustomizeRenderer, Kustomization, StaticRenderer};
