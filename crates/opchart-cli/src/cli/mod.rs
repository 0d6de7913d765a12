//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "opchart",
    bin_name = "opchart",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Package kubebuilder operators as installable charts",
    long_about = "opchart renders the default kustomize overlay of a kubebuilder \
                  project and reorganizes it into a chart: CRDs under crds/, \
                  everything else under templates/, plus Chart.yaml.",
    after_help = "EXAMPLES:\n\
        \x20 opchart build ./my-operator --chart-version 0.1.0\n\
        \x20 opchart default-cr ./my-operator --select 2 --output default.yaml\n\
        \x20 opchart inspect ./my-operator --output-format json\n\
        \x20 opchart completions bash > /usr/share/bash-completion/completions/opchart",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the chart of a project.
    #[command(
        visible_alias = "b",
        about = "Build a chart from a kubebuilder project",
        after_help = "EXAMPLES:\n\
            \x20 opchart build\n\
            \x20 opchart build ./my-operator --chart-version 1.2.0\n\
            \x20 opchart build ./my-operator --name example.com/custom --split"
    )]
    Build(BuildArgs),

    /// Select the default custom resource.
    #[command(
        name = "default-cr",
        about = "Print the default custom resource of a project",
        after_help = "EXAMPLES:\n\
            \x20 opchart default-cr ./my-operator\n\
            \x20 opchart default-cr ./my-operator --select 2\n\
            \x20 opchart default-cr ./my-operator --output default-cr.yaml"
    )]
    DefaultCr(DefaultCrArgs),

    /// Show what opchart reads from a project.
    #[command(
        about = "Show project metadata",
        after_help = "EXAMPLES:\n\
            \x20 opchart inspect ./my-operator\n\
            \x20 opchart inspect ./my-operator --output-format json"
    )]
    Inspect(ProjectArgs),

    /// Check that the project carries a config.yaml.
    #[command(name = "check-config", about = "Locate the project config.yaml")]
    CheckConfig(ProjectArgs),

    /// Initialise an opchart configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 opchart init           # user config directory\n\
            \x20 opchart init --local   # ./.opchart.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 opchart completions bash > ~/.local/share/bash-completion/completions/opchart\n\
            \x20 opchart completions zsh  > ~/.zfunc/_opchart\n\
            \x20 opchart completions fish > ~/.config/fish/completions/opchart.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the opchart configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 opchart config get renderer.program\n\
            \x20 opchart config list\n\
            \x20 opchart config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// A project directory argument.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Directory holding the PROJECT file.
    #[arg(value_name = "DIR", default_value = ".", help = "Project directory")]
    pub path: PathBuf,
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `opchart build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Chart name; only the last `/` segment names the directory.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Chart name (default: <domain>/<projectName>)"
    )]
    pub name: Option<String>,

    /// Version written to Chart.yaml, taken verbatim.
    #[arg(
        long = "chart-version",
        value_name = "VERSION",
        default_value = "0.1.0",
        help = "Chart version"
    )]
    pub chart_version: String,

    /// Write one file per rendered document.
    #[arg(
        long = "split",
        help = "Split the rendered stream into one file per document"
    )]
    pub split: bool,
}

// ── default-cr ────────────────────────────────────────────────────────────────

/// Arguments for `opchart default-cr`.
#[derive(Debug, Args)]
pub struct DefaultCrArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Answer the selection question without prompting.
    #[arg(
        short = 's',
        long = "select",
        value_name = "N",
        help = "1-based index of the sample to use (empty for the first)"
    )]
    pub select: Option<String>,

    /// Write the selected CR to a file instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the CR to FILE"
    )]
    pub output: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `opchart init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.opchart.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `opchart completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `opchart config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `renderer.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
