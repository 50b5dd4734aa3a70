//! Terminal-backed prompters.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};

use super::Prompter;
use crate::error::{Error, Result};

/// Interactive prompter on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    /// Creates a prompter with the colorful theme.
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .show_default(!default.is_empty())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Prompt(format!("Input cancelled: {e}")))
    }

    fn ask_secret(&mut self, prompt: &str) -> Result<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| Error::Prompt(format!("Input cancelled: {e}")))
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| Error::Prompt(format!("Input cancelled: {e}")))
    }
}

/// Non-interactive prompter for `--yes`: every question takes its default
/// and the summary is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn ask(&mut self, _prompt: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn ask_secret(&mut self, _prompt: &str) -> Result<String> {
        Ok(String::new())
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}
