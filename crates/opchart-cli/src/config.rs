//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `OPCHART_<SECTION>__<KEY>`, e.g.
//!    `OPCHART_RENDERER__PROGRAM=/usr/local/bin/kustomize`
//! 3. `--config FILE` (must exist)
//! 4. `./.opchart.toml`
//! 5. The user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ::config::{Config, Environment, File};
use opchart_adapters::renderer::{DEFAULT_ARGS, DEFAULT_PROGRAM};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "OPCHART";
pub const LOCAL_CONFIG_FILE: &str = ".opchart.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How manifests are rendered.
    pub renderer: RendererConfig,
    /// Build behaviour.
    pub build: BuildConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Program to run.
    pub program: String,
    /// Arguments placed before the overlay directory.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub split_documents: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.into(),
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// implicit locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(
            &Self::config_path(),
            Path::new(LOCAL_CONFIG_FILE),
            config_file.map(PathBuf::as_path),
        )
    }

    fn load_from(user: &Path, local: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("renderer.program", defaults.renderer.program.clone())?
            .set_default("renderer.args", defaults.renderer.args.clone())?
            .set_default("build.split_documents", defaults.build.split_documents)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format.clone())?
            .add_source(File::from(user).required(false))
            .add_source(File::from(local).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("renderer.args"),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.opchart.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "opchart", "opchart")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}
