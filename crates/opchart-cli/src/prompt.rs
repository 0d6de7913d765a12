//! Terminal-backed [`Prompter`].

use std::io::{self, BufRead, IsTerminal, Write};

use opchart_core::{
    application::{ApplicationError, ports::Prompter},
    error::OpchartResult,
};
use tracing::debug;

/// Asks questions on stderr and reads the answer from stdin.
///
/// With the `interactive` feature and a terminal on stdin the answer is read
/// through a line editor; otherwise a single raw line is consumed.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> OpchartResult<String> {
        let mut stderr = io::stderr().lock();
        stderr
            .write_all(question.as_bytes())
            .and_then(|()| stderr.flush())
            .map_err(prompt_failed)?;
        drop(stderr);

        let answer = if io::stdin().is_terminal() {
            read_interactive()?
        } else {
            read_line(io::stdin().lock())?
        };
        debug!(answer = %answer, "Prompt answered");
        Ok(answer)
    }
}

#[cfg(feature = "interactive")]
fn read_interactive() -> OpchartResult<String> {
    let answer = dialoguer::Input::<String>::new()
        .with_prompt(">")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_failed)?;
    Ok(answer)
}

#[cfg(not(feature = "interactive"))]
fn read_interactive() -> OpchartResult<String> {
    read_line(io::stdin().lock())
}

fn read_line(mut input: impl BufRead) -> OpchartResult<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(prompt_failed)?;
    if read == 0 {
        return Err(ApplicationError::PromptFailed {
            reason: "standard input closed before an answer was given".into(),
        }
        .into());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_failed(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::PromptFailed {
        reason: err.to_string(),
    }
}
