//! Non-interactive UI for CI/headless environments.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::engine::ProgressReporter;
use crate::error::{OrdertrackError, Result};
use crate::plan::Plan;

use super::board::{progress_line, render_plan, transitions, Transition};
use super::prompts::parse_answer;
use super::theme::OrdertrackTheme;
use super::{OutputMode, UserInterface};

const PROMPT_ENV_PREFIX: &str = "ORDERTRACK_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Questions are answered from `ORDERTRACK_PROMPT_<KEY>` environment
/// variables, falling back to the question's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_plan(&mut self, plan: &Plan) {
        if self.mode.shows_status() {
            println!("{}", render_plan(plan, &OrdertrackTheme::plain()));
        }
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase());
        match self.env_overrides.get(&env_key) {
            Some(value) => parse_answer(value).ok_or_else(|| {
                OrdertrackError::ConfigValidationError {
                    message: format!("{} must be yes or no, got '{}'", env_key, value),
                }
            }),
            None => Ok(default),
        }
    }

    fn progress_reporter(&self) -> Box<dyn ProgressReporter> {
        Box::new(LineReporter::new(self.mode))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prints progress as plain lines, one per finished step.
///
/// Verbose mode adds a line per operation transition.
pub struct LineReporter {
    mode: OutputMode,
    previous: RefCell<Option<Plan>>,
}

impl LineReporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            previous: RefCell::new(None),
        }
    }

    /// Lines this reporter would print for `snapshot`.
    pub fn lines_for(&self, previous: Option<&Plan>, snapshot: &Plan) -> Vec<String> {
        if !self.mode.shows_progress() {
            return Vec::new();
        }

        let mut lines: Vec<String> = transitions(previous, snapshot)
            .into_iter()
            .filter(|t| match t {
                Transition::Operation { .. } => self.mode.shows_transitions(),
                Transition::StepDone { .. } => true,
            })
            .map(|t| t.to_string())
            .collect();

        if previous.is_none() {
            lines.insert(0, progress_line(snapshot));
        }
        lines
    }
}

impl ProgressReporter for LineReporter {
    fn report(&self, snapshot: Plan) {
        let mut previous = self.previous.borrow_mut();
        for line in self.lines_for(previous.as_ref(), &snapshot) {
            println!("{}", line);
        }
        *previous = Some(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{OperationState, PlanKind, Track};

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn confirm_uses_default_without_override() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        assert!(ui.confirm("pay", "Pay now?", true).unwrap());
        assert!(!ui.confirm("pay", "Pay now?", false).unwrap());
    }

    #[test]
    fn confirm_uses_env_override() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Normal,
            overrides(&[("ORDERTRACK_PROMPT_PAY", "yes")]),
        );
        assert!(ui.confirm("pay", "Pay now?", false).unwrap());
    }

    #[test]
    fn confirm_rejects_garbage_override() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Normal,
            overrides(&[("ORDERTRACK_PROMPT_PAY", "perhaps")]),
        );
        let err = ui.confirm("pay", "Pay now?", false).unwrap_err();
        assert!(err.to_string().contains("ORDERTRACK_PROMPT_PAY"));
    }

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    fn advanced_listing() -> (Plan, Plan) {
        let mut plan = Plan::new(PlanKind::Listing);
        plan.set_state(0, Track::Local, OperationState::Running);
        let before = plan.clone();
        plan.set_state(0, Track::Local, OperationState::Done);
        plan.advance_cursor();
        (before, plan)
    }

    #[test]
    fn line_reporter_normal_prints_finished_steps() {
        let reporter = LineReporter::new(OutputMode::Normal);
        let (before, after) = advanced_listing();

        let lines = reporter.lines_for(Some(&before), &after);
        assert_eq!(lines, vec!["✓ [1/3] Encrypt dataset".to_string()]);
    }

    #[test]
    fn line_reporter_verbose_prints_operations() {
        let reporter = LineReporter::new(OutputMode::Verbose);
        let (before, after) = advanced_listing();

        let lines = reporter.lines_for(Some(&before), &after);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Local done"));
    }

    #[test]
    fn line_reporter_first_snapshot_prints_progress() {
        let reporter = LineReporter::new(OutputMode::Normal);
        let lines = reporter.lines_for(None, &Plan::new(PlanKind::Order));
        assert_eq!(lines, vec!["  0% · step 1/6 · Encrypt query".to_string()]);
    }

    #[test]
    fn line_reporter_quiet_prints_nothing() {
        let reporter = LineReporter::new(OutputMode::Quiet);
        let (before, after) = advanced_listing();
        assert!(reporter.lines_for(Some(&before), &after).is_empty());
    }
}
