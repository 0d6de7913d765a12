//! `opchart check-config`: locate the project's `config.yaml`.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::{OutputFormat, ProjectArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: ProjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (service, project) = super::open_project(&config, &args.path)?;
    let path = service.config(&project)?;

    match output.format() {
        OutputFormat::Json => output.json(&json!({ "config": path.display().to_string() }))?,
        OutputFormat::Plain => output.print(&path.display().to_string())?,
        _ => output.success(&format!("Found {}", path.display()))?,
    }
    Ok(())
}
