//! `opchart default-cr`: pick the sample CR shipped with the chart.

use tracing::{debug, instrument};

use opchart_adapters::ScriptedPrompter;
use opchart_core::prelude::*;

use crate::{
    cli::DefaultCrArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::TerminalPrompter,
};

/// Execute the `opchart default-cr` command.
///
/// `--select` answers the selection question up front; without it the user
/// is asked on the terminal when more than one sample exists.
#[instrument(skip_all, fields(path = %args.project.path.display()))]
pub fn execute(args: DefaultCrArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if let Some(path) = args.output.as_ref().filter(|p| p.is_dir()) {
        return Err(CliError::InvalidInput {
            message: format!("--output '{}' is a directory", path.display()),
            source: None,
        });
    }

    let (service, project) = super::open_project(&config, &args.project.path)?;

    let prompter: Box<dyn Prompter> = match args.select {
        Some(answer) => {
            debug!(answer = %answer, "Selection given on the command line");
            Box::new(ScriptedPrompter::new([answer]))
        }
        None => Box::new(TerminalPrompter::new()),
    };

    let cr = service.default_cr(&project, prompter.as_ref())?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &cr)
                .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
            output.success(&format!("Default CR written to {}", path.display()))?;
        }
        None => output.raw(&cr)?,
    }

    Ok(())
}
