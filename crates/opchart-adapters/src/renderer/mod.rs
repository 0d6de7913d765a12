//! Manifest renderer adapters.

mod error;
mod fixed;
mod kustomization;
mod kustomize;

pub use error::RenderError;
pub use fixed::StaticRenderer;
pub use kustomization::{KUSTOMIZATION_FILE_NAMES, Kustomization};
pub use kustomize::{DEFAULT_ARGS, DEFAULT_PROGRAM, KustomizeRenderer};
