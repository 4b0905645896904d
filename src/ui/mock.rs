//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion, including every plan snapshot handed
//! to its progress reporter.
//!
//! # Example
//!
//! ```
//! use ordertrack::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("pay", true);
//!
//! ui.message("Opening order #7");
//! assert!(ui.confirm("pay", "Pay now?", false).unwrap());
//! assert!(ui.has_message("order #7"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::ProgressReporter;
use crate::error::Result;
use crate::plan::Plan;

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    plans_shown: Vec<Plan>,
    confirm_responses: HashMap<String, bool>,
    prompts_shown: Vec<String>,
    snapshots: Rc<RefCell<Vec<Plan>>>,
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

    /// Answer for the question with this key.
    pub fn set_confirm_response(&mut self, key: &str, answer: bool) {
        self.confirm_responses.insert(key.to_string(), answer);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Plans passed to `show_plan`.
    pub fn plans_shown(&self) -> &[Plan] {
        &self.plans_shown
    }

    /// Keys of the questions asked so far.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Snapshots received by every reporter this UI handed out.
    pub fn snapshots(&self) -> Vec<Plan> {
        self.snapshots.borrow().clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
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

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_plan(&mut self, plan: &Plan) {
        self.plans_shown.push(plan.clone());
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        self.prompts_shown.push(key.to_string());
        Ok(self.confirm_responses.get(key).copied().unwrap_or(default))
    }

    fn progress_reporter(&self) -> Box<dyn ProgressReporter> {
        Box::new(MockReporter {
            snapshots: Rc::clone(&self.snapshots),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Reporter handed out by [`MockUI`]; shares its snapshot log.
#[derive(Debug)]
pub struct MockReporter {
    snapshots: Rc<RefCell<Vec<Plan>>>,
}

impl ProgressReporter for MockReporter {
    fn report(&self, snapshot: Plan) {
        self.snapshots.borrow_mut().push(snapshot);
    }
}
