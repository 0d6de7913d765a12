//! Command output on stdout.
//!
//! Decorated messages respect `--quiet`; results (`json`, `raw`) are always
//! written.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Badge {
    Success,
    Warning,
    Info,
}

impl Badge {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }
}

/// Writes command results to stdout in the resolved format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // flag, then config file, then terminal detection
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.colour_disabled()
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Line of text; dropped with `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.badge(Badge::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.badge(Badge::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.badge(Badge::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.print(text)
        } else {
            self.print(&text.cyan().bold().to_string())
        }
    }

    fn badge(&self, badge: Badge, msg: &str) -> io::Result<()> {
        let symbol = badge.symbol();
        if self.no_color {
            return self.print(&format!("{symbol} {msg}"));
        }
        let line = match badge {
            Badge::Success => format!("{} {}", symbol.green().bold(), msg.green()),
            Badge::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
            Badge::Info => format!("{} {}", symbol.blue().bold(), msg),
        };
        self.print(&line)
    }

    /// `key: value` line with a dimmed key.
    pub fn field(&self, key: &str, value: &str) -> io::Result<()> {
        if self.no_color {
            self.print(&format!("{key:<12} {value}"))
        } else {
            self.print(&format!("{} {value}", format!("{key:<12}").dimmed()))
        }
    }

    /// Pretty JSON document.  Printed even in quiet mode: it is the result.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Raw bytes to stdout, untouched.  Printed even in quiet mode.
    pub fn raw(&self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }

    /// Spinner on stderr for long-running steps; `None` unless output is
    /// human-readable.
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return None;
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}
