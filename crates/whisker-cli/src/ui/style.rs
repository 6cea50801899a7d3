//! Message styling for CLI output.
//!
//! | Prefix | Meaning | Color |
//! |--------|---------|-------|
//! | `[ok]` | Success | Green |
//! | `[err]` | Error | Red |
//! | `[warn]` | Warning | Yellow |
//! | `[info]` | Information | Blue |
//! | `[hint]` | Suggestion | Cyan |
//! | `[skip]` | Skipped | Dim |

use owo_colors::OwoColorize;

use super::color::ColorMode;
use super::format::short_id;

/// Message severity/type for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Ok,
    Err,
    Warn,
    Info,
    Hint,
    Skip,
}

impl MessageType {
    /// Returns the prefix text for this message type.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Ok => "[ok]",
            Self::Err => "[err]",
            Self::Warn => "[warn]",
            Self::Info => "[info]",
            Self::Hint => "[hint]",
            Self::Skip => "[skip]",
        }
    }
}

/// Styling interface for CLI output.
///
/// # Example
///
/// ```ignore
/// let style = Style::new(ColorMode::Never);
/// assert_eq!(style.message(MessageType::Ok, "Stored fact"), "[ok] Stored fact");
/// ```
#[derive(Debug, Clone)]
pub struct Style {
    color_mode: ColorMode,
    quiet: bool,
}

impl Style {
    /// Create a Style with an explicit color mode.
    pub fn new(color_mode: ColorMode) -> Self {
        Self {
            color_mode,
            quiet: false,
        }
    }

    /// Suppress informational messages (`--quiet`).
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(&self) -> bool {
        self.color_mode.is_enabled()
    }

    /// Whether `--quiet` is in effect.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Format a simple message with a type prefix.
    pub fn message(&self, msg_type: MessageType, text: &str) -> String {
        let prefix = msg_type.prefix();
        if self.colors_enabled() {
            let colored_prefix = match msg_type {
                MessageType::Ok => prefix.green().to_string(),
                MessageType::Err => prefix.red().to_string(),
                MessageType::Warn => prefix.yellow().to_string(),
                MessageType::Info => prefix.blue().to_string(),
                MessageType::Hint => prefix.cyan().to_string(),
                MessageType::Skip => prefix.dimmed().to_string(),
            };
            format!("{} {}", colored_prefix, text)
        } else {
            format!("{} {}", prefix, text)
        }
    }

    /// Print an informational message to stdout unless `--quiet` is set.
    pub fn info(&self, msg_type: MessageType, text: &str) {
        if !self.quiet {
            println!("{}", self.message(msg_type, text));
        }
    }

    /// Format a detail line with 5-space indentation.
    pub fn message_detail(&self, label: &str, value: &str) -> String {
        format!("     {}: {}", label, value)
    }

    /// Format a section header.
    pub fn section(&self, title: &str) -> String {
        if self.colors_enabled() {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format an error with optional cause and hint lines.
    pub fn error_with_context(&self, msg: &str, cause: Option<&str>, hint: Option<&str>) -> String {
        let mut output = self.message(MessageType::Err, msg);

        if let Some(cause_text) = cause {
            output.push_str(&format!("\n      Cause: {}", cause_text));
        }
        if let Some(hint_text) = hint {
            output.push_str(&format!("\n      Hint: {}", hint_text));
        }

        output
    }

    /// Format a key-value pair.
    pub fn key_value(&self, key: &str, value: &str) -> String {
        if self.colors_enabled() {
            format!("{}: {}", key.dimmed(), value)
        } else {
            format!("{}: {}", key, value)
        }
    }

    /// Format a fact id (first 8 chars, yellow).
    pub fn fact_id(&self, id: &str) -> String {
        let short = short_id(id);
        if self.colors_enabled() {
            short.yellow().to_string()
        } else {
            short.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_prefix() {
        assert_eq!(MessageType::Ok.prefix(), "[ok]");
        assert_eq!(MessageType::Err.prefix(), "[err]");
        assert_eq!(MessageType::Skip.prefix(), "[skip]");
    }

    #[test]
    fn test_message_no_color() {
        let style = Style::new(ColorMode::Never);
        assert_eq!(style.message(MessageType::Ok, "Stored"), "[ok] Stored");
        assert_eq!(style.message(MessageType::Err, "Failed"), "[err] Failed");
    }

    #[test]
    fn test_error_with_context() {
        let style = Style::new(ColorMode::Never);
        let output = style.error_with_context(
            "Generation failed",
            Some("ANTHROPIC_API_KEY is not set"),
            Some("export ANTHROPIC_API_KEY"),
        );
        assert!(output.starts_with("[err] Generation failed"));
        assert!(output.contains("Cause: ANTHROPIC_API_KEY is not set"));
        assert!(output.contains("Hint: export ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_fact_id() {
        let style = Style::new(ColorMode::Never);
        assert_eq!(style.fact_id("abcdef0123456789"), "abcdef01");
    }

    #[test]
    fn test_quiet() {
        let style = Style::new(ColorMode::Never).with_quiet(true);
        assert!(style.is_quiet());
        assert_eq!(style.message_detail("Facts", "45"), "     Facts: 45");
    }
}
