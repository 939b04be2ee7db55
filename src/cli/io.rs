use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Password};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for a secret without echoing it.
pub fn prompt_password(
    theme: &ColorfulTheme,
    prompt: &str,
    confirm: bool,
) -> Result<String, CommandError> {
    let mut input = Password::with_theme(theme).with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Repeat password", "Passwords do not match");
    }
    input.interact().map_err(CommandError::from)
}
