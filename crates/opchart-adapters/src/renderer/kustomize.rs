//! Renderer that shells out to kustomize.

use std::path::Path;
use std::process::Command;

use opchart_core::{
    application::ports::ManifestRenderer,
    domain::RenderedManifests,
    error::{OpchartError, OpchartResult},
};
use tracing::{debug, instrument, warn};

use super::{Kustomization, RenderError};

pub const DEFAULT_PROGRAM: &str = "kustomize";
pub const DEFAULT_ARGS: &[&str] = &["build"];

/// Runs `<program> <args...> <overlay_dir>` and takes its stdout.
///
/// The kustomization file is parsed first, so a missing or broken overlay
/// is reported without starting the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KustomizeRenderer {
    program: String,
    args: Vec<String>,
}

impl KustomizeRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn run(&self, overlay_dir: &Path) -> Result<Vec<u8>, RenderError> {
        let kustomization = Kustomization::load(overlay_dir)?;
        debug!(
            namespace = ?kustomization.namespace,
            name_prefix = ?kustomization.name_prefix,
            inputs = ?kustomization.inputs().collect::<Vec<_>>(),
            "Kustomization loaded"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(overlay_dir)
            .output()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !output.stderr.is_empty() {
            warn!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Renderer wrote to stderr"
            );
        }

        Ok(output.stdout)
    }
}

impl Default for KustomizeRenderer {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl ManifestRenderer for KustomizeRenderer {
    #[instrument(skip_all, fields(program = %self.program, overlay = %overlay_dir.display()))]
    fn render(&self, overlay_dir: &Path) -> OpchartResult<RenderedManifests> {
        if self.program.trim().is_empty() {
            return Err(OpchartError::Configuration {
                message: "renderer program is empty".into(),
            });
        }
        let stdout = self.run(overlay_dir)?;
        debug!(bytes = stdout.len(), "Renderer finished");
        Ok(RenderedManifests::new(stdout))
    }
}
