//! Renderer returning a fixed stream, for tests and dry runs.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use opchart_core::{
    application::{ApplicationError, ports::ManifestRenderer},
    domain::RenderedManifests,
    error::OpchartResult,
};

/// Always renders the same bytes and remembers which overlays it was asked for.
#[derive(Debug, Default)]
pub struct StaticRenderer {
    output: Vec<u8>,
    calls: Mutex<Vec<PathBuf>>,
}

impl StaticRenderer {
    pub fn new(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            calls: Mutex::default(),
        }
    }

    /// Overlay directories passed to `render`, oldest first.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ManifestRenderer for StaticRenderer {
    fn render(&self, overlay_dir: &Path) -> OpchartResult<RenderedManifests> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(overlay_dir.to_path_buf());
        Ok(RenderedManifests::new(self.output.clone()))
    }
}
