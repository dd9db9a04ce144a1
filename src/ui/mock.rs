//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmation answers can be
//! configured per question.
//!
//! # Example
//!
//! ```
//! use botctl::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("Remove", false);
//!
//! ui.message("Starting deploy");
//! ui.success("Done!");
//! assert!(!ui.confirm("Remove telegram-bot.service?", true).unwrap());
//!
//! assert!(ui.has_message("Starting deploy"));
//! assert!(ui.has_success("Done!"));
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions. Confirmations are answered from
/// responses keyed by a substring of the question, falling back to the
/// caller's default.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    sections: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<String>,
    error_blocks: Vec<(String, String, Option<String>)>,
    confirm_responses: HashMap<String, bool>,
    questions: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Answer any question containing `fragment` with `answer`.
    pub fn set_confirm_response(&mut self, fragment: &str, answer: bool) {
        self.confirm_responses.insert(fragment.to_string(), answer);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured section titles, in order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all captured error blocks as (command, output, hint).
    pub fn error_blocks(&self) -> &[(String, String, Option<String>)] {
        &self.error_blocks
    }

    /// Questions asked through `confirm`.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific hint was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.questions.push(question.to_string());
        let answer = self
            .confirm_responses
            .iter()
            .find(|(fragment, _)| question.contains(fragment.as_str()))
            .map(|(_, answer)| *answer)
            .unwrap_or(default);
        Ok(answer)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_section(&mut self, title: &str) {
        self.sections.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn show_error_block(&mut self, command: &str, output: &str, hint: Option<&str>) {
        self.error_blocks.push((
            command.to_string(),
            output.to_string(),
            hint.map(|h| h.to_string()),
        ));
        self.errors.push(command.to_string());
        if let Some(h) = hint {
            self.hints.push(h.to_string());
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the finish status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Failed");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Careful"]);
        assert_eq!(ui.errors(), &["Failed"]);
    }

    #[test]
    fn confirm_falls_back_to_default() {
        let mut ui = MockUI::new();
        assert!(ui.confirm("Proceed?", true).unwrap());
        assert!(!ui.confirm("Proceed?", false).unwrap());
        assert_eq!(ui.questions().len(), 2);
    }

    #[test]
    fn confirm_matches_fragment() {
        let mut ui = MockUI::new();
        ui.set_confirm_response("telegram-bot", true);
        assert!(ui.confirm("Remove telegram-bot.service?", false).unwrap());
    }

    #[test]
    fn error_block_records_hint() {
        let mut ui = MockUI::new();
        ui.show_error_block("pip install", "out", Some("check network"));

        assert_eq!(ui.error_blocks().len(), 1);
        assert!(ui.has_error("pip install"));
        assert!(ui.has_hint("check network"));
    }

    #[test]
    fn sections_are_recorded_in_order() {
        let mut ui = MockUI::new();
        ui.show_section("Service");
        ui.show_section("Journal");
        assert_eq!(ui.sections(), &["Service", "Journal"]);
    }

    #[test]
    fn mock_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        spinner.finish_error("nope");
        assert_eq!(spinner.status(), Some(SpinnerStatus::Error));
        assert_eq!(spinner.finish_message(), Some("nope"));
    }
}
