//! `opchart`: turn a kubebuilder operator project into an installable chart.
//!
//! Exit status is 0 on success, 2 for usage and input errors, 3 when a
//! required resource is missing, 4 for configuration or renderer setup
//! problems and 1 for everything else.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("opchart: {e:#}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    let no_color = cli.global.colour_disabled();

    match run(cli) {
        Ok(()) => {
            debug!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, verbose, no_color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: None,
    })?;
    debug!(?config, "Configuration loaded");

    let output = OutputManager::new(&cli.global, &config);

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, config, output),
        Commands::DefaultCr(args) => commands::default_cr::execute(args, config, output),
        Commands::Inspect(args) => commands::inspect::execute(args, config, output),
        Commands::CheckConfig(args) => commands::check_config::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Report `err` on stderr and turn it into the process exit status.
fn report(err: &CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let text = if !no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{text}");

    ExitCode::from(err.exit_code())
}
