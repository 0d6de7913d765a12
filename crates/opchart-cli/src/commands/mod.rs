//! Command handlers, one module per subcommand.

pub mod build;
pub mod check_config;
pub mod completions;
pub mod config;
pub mod default_cr;
pub mod init;
pub mod inspect;

use std::path::Path;
use std::sync::Arc;

use opchart_adapters::{KustomizeRenderer, LocalFilesystem};
use opchart_core::prelude::*;

use crate::{config::AppConfig, error::CliResult};

/// Wire the production adapters into a [`ProjectService`].
pub(crate) fn project_service(config: &AppConfig) -> ProjectService {
    let renderer = KustomizeRenderer::new(
        config.renderer.program.clone(),
        config.renderer.args.clone(),
    );
    ProjectService::new(Arc::new(LocalFilesystem::new()), Arc::new(renderer))
}

/// Build the service and load the project at `path`.
pub(crate) fn open_project(config: &AppConfig, path: &Path) -> CliResult<(ProjectService, Project)> {
    let service = project_service(config);
    let project = service.parse_project(path)?;
    Ok((service, project))
}
