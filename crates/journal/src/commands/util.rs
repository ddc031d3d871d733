//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use journal_core::{Locale, LocalizedText};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Fail early when stdin/stderr are not a terminal.
pub fn require_terminal(command: &str) -> Result<(), CliError> {
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: "terminal".into(),
            reason: format!("`journal {command}` needs an interactive terminal"),
        })
    }
}

/// Stderr spinner for slow fetches. Hidden when quiet or not a terminal.
pub fn spinner(global: &GlobalOpts, message: impl Into<String>) -> ProgressBar {
    if global.quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Localized text, or a dash when nothing resolves.
pub fn text(value: &LocalizedText, locale: Locale) -> String {
    value.get(locale).unwrap_or("-").to_owned()
}

/// Same as [`text`] for optional fields.
pub fn opt_text(value: Option<&LocalizedText>, locale: Locale) -> String {
    value.map_or_else(|| "-".to_owned(), |v| text(v, locale))
}

/// Indent every line of `body` by `width` spaces.
pub fn indent(body: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    body.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
