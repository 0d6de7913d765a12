//! `opchart build`: render the default overlay into a chart.

use serde_json::json;
use tracing::{info, instrument};

use opchart_core::prelude::*;

use crate::{
    cli::{BuildArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `opchart build` command.
///
/// The chart name defaults to `<domain>/<projectName>`; `--split` and the
/// `build.split_documents` setting both turn on per-document output.
#[instrument(skip_all, fields(path = %args.project.path.display()))]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (service, project) = super::open_project(&config, &args.project.path)?;

    let name = args.name.unwrap_or_else(|| project.full_name());
    let options = BuildOptions {
        split_documents: args.split || config.build.split_documents,
    };
    info!(name = %name, version = %args.chart_version, split = options.split_documents, "Building chart");

    let spinner = output.spinner(&format!("Building chart {name}"));
    let result = service.build(&project, &name, &args.chart_version, &options);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let chart = result?;

    match output.format() {
        OutputFormat::Json => output.json(&json!({
            "name": chart.file_name().map(|n| n.to_string_lossy().into_owned()),
            "version": args.chart_version,
            "path": chart.display().to_string(),
            "split": options.split_documents,
        }))?,
        OutputFormat::Plain => output.print(&chart.display().to_string())?,
        _ => output.success(&format!("Chart written to {}", chart.display()))?,
    }

    Ok(())
}
