//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use sprout::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Creating project");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Creating project".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::sync::{Arc, Mutex};

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    confirm_answer: Option<bool>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    spinners: Vec<String>,
    spinner_results: Arc<Mutex<Vec<String>>>,
    confirmations: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Answer every confirmation with `answer` instead of the default.
    pub fn set_confirm_answer(&mut self, answer: bool) {
        self.confirm_answer = Some(answer);
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get the messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Finish lines of every spinner started, prefixed `ok:` or `err:`.
    pub fn spinner_results(&self) -> Vec<String> {
        self.spinner_results
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Get every confirmation question asked.
    pub fn confirmations(&self) -> &[String] {
        &self.confirmations
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
        self.confirmations.push(question.to_string());
        Ok(self.confirm_answer.unwrap_or(default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            results: Some(self.spinner_results.clone()),
            ..MockSpinner::default()
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner for testing.
#[derive(Debug, Default)]
pub struct MockSpinner {
    results: Option<Arc<Mutex<Vec<String>>>>,
    messages: Vec<String>,
    finish_message: Option<String>,
    succeeded: Option<bool>,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Whether the spinner finished successfully, if it finished.
    pub fn succeeded(&self) -> Option<bool> {
        self.succeeded
    }

    fn finish(&mut self, msg: &str, ok: bool) {
        if let Some(results) = &self.results {
            if let Ok(mut results) = results.lock() {
                results.push(format!("{}: {}", if ok { "ok" } else { "err" }, msg));
            }
        }
        self.finish_message = Some(msg.to_string());
        self.succeeded = Some(ok);
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(msg, true);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(msg, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("boom");

        assert_eq!(ui.messages(), ["hello"]);
        assert_eq!(ui.warnings(), ["careful"]);
        assert_eq!(ui.errors(), ["boom"]);
    }

    #[test]
    fn confirm_uses_configured_answer() {
        let mut ui = MockUI::new();
        assert!(ui.confirm("Proceed?", true).unwrap());

        ui.set_confirm_answer(false);
        assert!(!ui.confirm("Proceed?", true).unwrap());
        assert_eq!(ui.confirmations().len(), 2);
    }

    #[test]
    fn mock_spinner_tracks_finish() {
        let mut spinner = MockSpinner::new();
        spinner.set_message("Fetching template");
        spinner.finish_error("Download failed");

        assert_eq!(spinner.messages(), ["Fetching template"]);
        assert_eq!(spinner.finish_message(), Some("Download failed"));
        assert_eq!(spinner.succeeded(), Some(false));
    }
}
