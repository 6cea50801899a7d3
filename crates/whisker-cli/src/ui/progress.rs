//! Spinner for calls to the text generator.
//!
//! Hidden when `--quiet` or `--json` is set, or when stdout is not a TTY.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::color::stdout_is_terminal;

/// Spinner tick characters (Braille-based).
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// An indeterminate progress indicator.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start a spinner, or a hidden one if `visible` is false or stdout is not a TTY.
    pub fn start(message: &str, visible: bool) -> Self {
        if !visible || !stdout_is_terminal() {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_CHARS);
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Clear the spinner line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
