use super::FieldGroup;
use crate::error::QrvcError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// The user pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,

    #[error("{0}")]
    Terminal(String),
}

impl From<PromptError> for QrvcError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => QrvcError::Cancelled,
            PromptError::Terminal(message) => QrvcError::Prompt(message),
        }
    }
}

/// Asks the user for values. The edit session talks to the user only
/// through this trait.
pub trait Prompter {
    /// Called before the first question of each group.
    fn begin_group(&mut self, group: FieldGroup) -> Result<(), PromptError>;

    /// Free text, pre-filled with `initial`.
    fn input(&mut self, label: &str, initial: &str) -> Result<String, PromptError>;

    /// Single choice; returns the index into `options`.
    fn select(&mut self, label: &str, options: &[&str], default: usize)
        -> Result<usize, PromptError>;

    /// Yes/no question with custom labels for both answers.
    fn confirm(&mut self, label: &str, affirmative: &str, negative: &str)
        -> Result<bool, PromptError>;
}
