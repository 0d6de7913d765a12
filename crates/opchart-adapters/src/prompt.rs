//! Prompter answering from a fixed script.
//!
//! Used for non-interactive selection (`--select`) and in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use opchart_core::{
    application::{ApplicationError, ports::Prompter},
    error::OpchartResult,
};
use tracing::debug;

/// Hands out pre-recorded answers in order and records every question.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            questions: Mutex::default(),
        }
    }

    /// Questions asked so far.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str) -> OpchartResult<String> {
        self.questions
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(question.to_string());

        let answer = self
            .answers
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .pop_front()
            .ok_or_else(|| ApplicationError::PromptFailed {
                reason: "no scripted answer left".into(),
            })?;

        debug!(answer = %answer, "Scripted answer");
        Ok(answer)
    }
}
