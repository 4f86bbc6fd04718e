use super::styles::QRVC_THEME;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use qrvc::editor::{FieldGroup, PromptError, Prompter};
use std::io;

/// Asks questions on the terminal with `dialoguer`.
pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }

    /// Shows the cursor again after an interrupted prompt left it hidden.
    pub fn restore(&self) {
        let _ = self.term.show_cursor();
    }
}

impl Prompter for TerminalPrompter {
    fn begin_group(&mut self, group: FieldGroup) -> Result<(), PromptError> {
        let heading = QRVC_THEME.heading.apply_to(group.heading()).to_string();
        self.term.write_line("").map_err(terminal_error)?;
        self.term.write_line(&heading).map_err(terminal_error)
    }

    fn input(&mut self, label: &str, initial: &str) -> Result<String, PromptError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(prompt_error)
    }

    fn select(
        &mut self,
        label: &str,
        options: &[&str],
        default: usize,
    ) -> Result<usize, PromptError> {
        Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(options)
            .default(default)
            .interact_on(&self.term)
            .map_err(prompt_error)
    }

    fn confirm(
        &mut self,
        label: &str,
        affirmative: &str,
        negative: &str,
    ) -> Result<bool, PromptError> {
        let chosen = self.select(label, &[affirmative, negative], 0)?;
        Ok(chosen == 0)
    }
}

fn prompt_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(e) => terminal_error(e),
    }
}

fn terminal_error(err: io::Error) -> PromptError {
    if err.kind() == io::ErrorKind::Interrupted {
        PromptError::Interrupted
    } else {
        PromptError::Terminal(err.to_string())
    }
}
