//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use botctl::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Support Bot");
//! ui.success("Dependencies installed");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BotctlTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    ///
    /// Non-interactive implementations answer with `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a section title inside a report.
    fn show_section(&mut self, title: &str) {
        self.message(&format!("\n{}", title));
    }

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str) {
        self.message(hint);
    }

    /// Show a failed command with its captured output.
    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        self.error(command);
        if !output.is_empty() {
            self.message(output);
        }
        if let Some(h) = hint {
            self.show_hint(h);
        }
    }

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minimal {
        lines: Vec<String>,
    }

    impl UserInterface for Minimal {
        fn output_mode(&self) -> OutputMode {
            OutputMode::Normal
        }
        fn message(&mut self, msg: &str) {
            self.lines.push(msg.to_string());
        }
        fn success(&mut self, msg: &str) {
            self.lines.push(msg.to_string());
        }
        fn warning(&mut self, msg: &str) {
            self.lines.push(msg.to_string());
        }
        fn error(&mut self, msg: &str) {
            self.lines.push(format!("error: {}", msg));
        }
        fn confirm(&mut self, _question: &str, default: bool) -> Result<bool> {
            Ok(default)
        }
        fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
            Box::new(MockSpinner::new())
        }
        fn show_header(&mut self, title: &str) {
            self.lines.push(title.to_string());
        }
        fn is_interactive(&self) -> bool {
            false
        }
    }

    #[test]
    fn default_error_block_routes_through_message_and_error() {
        let mut ui = Minimal { lines: Vec::new() };

        ui.show_error_block("pip install -r requirements.txt", "boom", Some("check"));

        assert_eq!(
            ui.lines,
            vec![
                "error: pip install -r requirements.txt".to_string(),
                "boom".to_string(),
                "check".to_string(),
            ]
        );
    }

    #[test]
    fn default_section_is_a_message() {
        let mut ui = Minimal { lines: Vec::new() };
        ui.show_section("Memory");
        assert_eq!(ui.lines, vec!["\nMemory".to_string()]);
    }
}
