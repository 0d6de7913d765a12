//! `opchart inspect`: show what opchart reads from a project.

use serde_json::json;
use tracing::instrument;

use opchart_core::prelude::*;

use crate::{
    cli::{OutputFormat, ProjectArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: ProjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (_, project) = super::open_project(&config, &args.path)?;
    let supported = project.validate_layout().is_ok();

    if output.format() == OutputFormat::Json {
        output.json(&describe(&project, supported))?;
        return Ok(());
    }

    output.header(&project.full_name())?;
    output.field("path", &project.path().display().to_string())?;
    output.field("layout", &project.layouts().join(", "))?;
    output.field("repo", project.repo().unwrap_or("-"))?;
    output.field("version", project.version().unwrap_or("-"))?;
    for resource in project.resources() {
        output.field("resource", &resource.to_string())?;
    }
    if !supported {
        output.warning("This project layout is not supported by build or default-cr")?;
    }
    Ok(())
}

fn describe(project: &Project, supported: bool) -> serde_json::Value {
    json!({
        "name": project.name(),
        "fullName": project.full_name(),
        "domain": project.domain(),
        "repo": project.repo(),
        "version": project.version(),
        "layout": project.layouts(),
        "supported": supported,
        "path": project.path().display().to_string(),
        "resources": project.resources(),
    })
}
