//! Choosing the default custom resource among the project samples.
//!
//! Resolution is a single request/response: either the answer is known from
//! the listing alone, or one question is asked and its answer is final.

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

pub const SAMPLE_EXTENSIONS: &[&str] = &[".yaml", ".yml"];
pub const DEFAULT_CHOICE_HINT: &str = "Press ENTER to select the first option as default.";

/// Entries of the samples directory, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleCandidates {
    dir: PathBuf,
    entries: Vec<String>,
}

/// Outcome of looking at the candidates before any interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one entry: no question needed.
    Single(PathBuf),
    /// More than one entry: the user has to pick.
    Ask(CandidatePrompt),
}

impl SampleCandidates {
    pub fn new(dir: impl Into<PathBuf>, entries: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            entries,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The single-entry shortcut counts every entry, whatever its extension.
    /// Only YAML entries are offered when asking.
    pub fn resolve(&self) -> Result<Resolution, DomainError> {
        match self.entries.as_slice() {
            [] => Err(DomainError::NoDefaultCr {
                dir: self.dir.clone(),
            }),
            [only] => Ok(Resolution::Single(self.dir.join(only))),
            entries => Ok(Resolution::Ask(CandidatePrompt {
                dir: self.dir.clone(),
                choices: entries
                    .iter()
                    .filter(|name| is_manifest_name(name))
                    .cloned()
                    .collect(),
            })),
        }
    }
}

fn is_manifest_name(name: &str) -> bool {
    SAMPLE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// The numbered choice list shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePrompt {
    dir: PathBuf,
    choices: Vec<String>,
}

impl CandidatePrompt {
    /// Choices, where `choices()[i]` is offered as `[i + 1]`.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn question(&self) -> String {
        let mut question = format!(
            "Please specify the file to use as default CR in {}:\n",
            self.dir.display()
        );
        for (i, name) in self.choices.iter().enumerate() {
            question.push_str(&format!("[{}] {}\n", i + 1, name));
        }
        question.push_str(DEFAULT_CHOICE_HINT);
        question.push('\n');
        question
    }

    /// Turn the user's answer into the chosen file path.
    ///
    /// Surrounding whitespace is ignored. An empty answer means `1`. Anything
    /// else must be a number within `1..=choices().len()`.
    pub fn answer(&self, raw: &str) -> Result<PathBuf, DomainError> {
        let raw = raw.trim();
        let index: i64 = if raw.is_empty() {
            1
        } else {
            raw.parse::<i64>()
                .map_err(|e| DomainError::SelectionUnparsable {
                    answer: raw.to_string(),
                    reason: e.to_string(),
                })?
        };

        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.choices.get(i))
            .map(|name| self.dir.join(name))
            .ok_or(DomainError::SelectionOutOfRange { index })
    }
}
