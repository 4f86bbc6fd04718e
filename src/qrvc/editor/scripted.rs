//! A [`Prompter`] that replays canned answers, for tests.

use super::prompt::{PromptError, Prompter};
use super::FieldGroup;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    /// Accept the pre-filled value or the default choice.
    Keep,
    Choice(usize),
    Confirm(bool),
    Interrupt,
    Fail(String),
}

impl Answer {
    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text(value.into())
    }
}

/// Replays answers in order and records what it was asked.
///
/// Once the script runs out every question is answered with [`Answer::Keep`]
/// and confirmations with yes.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub groups: Vec<FieldGroup>,
    pub labels: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Keeps every value and confirms on the first pass.
    pub fn accepting() -> Self {
        Self::default()
    }

    fn next(&mut self, label: &str) -> Answer {
        self.labels.push(label.to_string());
        self.answers.pop_front().unwrap_or(Answer::Keep)
    }
}

impl Prompter for ScriptedPrompter {
    fn begin_group(&mut self, group: FieldGroup) -> Result<(), PromptError> {
        self.groups.push(group);
        Ok(())
    }

    fn input(&mut self, label: &str, initial: &str) -> Result<String, PromptError> {
        match self.next(label) {
            Answer::Text(value) => Ok(value),
            Answer::Interrupt => Err(PromptError::Interrupted),
            Answer::Fail(message) => Err(PromptError::Terminal(message)),
            _ => Ok(initial.to_string()),
        }
    }

    fn select(
        &mut self,
        label: &str,
        options: &[&str],
        default: usize,
    ) -> Result<usize, PromptError> {
        match self.next(label) {
            Answer::Choice(index) if index < options.len() => Ok(index),
            Answer::Interrupt => Err(PromptError::Interrupted),
            Answer::Fail(message) => Err(PromptError::Terminal(message)),
            _ => Ok(default),
        }
    }

    fn confirm(
        &mut self,
        label: &str,
        _affirmative: &str,
        _negative: &str,
    ) -> Result<bool, PromptError> {
        match self.next(label) {
            Answer::Confirm(yes) => Ok(yes),
            Answer::Interrupt => Err(PromptError::Interrupted),
            Answer::Fail(message) => Err(PromptError::Terminal(message)),
            _ => Ok(true),
        }
    }
}
