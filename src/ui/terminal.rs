//! Interactive terminal UI.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::io::Write;

use crate::engine::ProgressReporter;
use crate::error::Result;
use crate::plan::Plan;

use super::board::{render_plan, transitions, Transition};
use super::prompts::confirm;
use super::{should_use_colors, NonInteractiveUI, OrdertrackTheme, OutputMode, UserInterface};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: OrdertrackTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: pick_theme(),
            mode,
        }
    }
}

fn pick_theme() -> OrdertrackTheme {
    if should_use_colors() {
        OrdertrackTheme::new()
    } else {
        OrdertrackTheme::plain()
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_plan(&mut self, plan: &Plan) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", render_plan(plan, &self.theme)).ok();
        }
    }

    fn confirm(&mut self, _key: &str, question: &str, default: bool) -> Result<bool> {
        confirm(question, default, &self.term)
    }

    fn progress_reporter(&self) -> Box<dyn ProgressReporter> {
        Box::new(TerminalReporter::new(self.mode, self.theme.clone()))
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Renders a running plan as a progress bar over its steps.
///
/// Finished steps (and, in verbose mode, every operation transition) are
/// printed above the bar.
pub struct TerminalReporter {
    bar: ProgressBar,
    mode: OutputMode,
    theme: OrdertrackTheme,
    previous: RefCell<Option<Plan>>,
}

impl TerminalReporter {
    pub fn new(mode: OutputMode, theme: OrdertrackTheme) -> Self {
        let bar = if mode.shows_progress() {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(bar_style());

        Self {
            bar,
            mode,
            theme,
            previous: RefCell::new(None),
        }
    }

    /// The underlying bar, for inspection in tests.
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    fn print(&self, transition: &Transition) {
        let line = match transition {
            Transition::Operation { .. } if self.mode.shows_transitions() => {
                self.theme.dim.apply_to(transition.to_string()).to_string()
            }
            Transition::StepDone { .. } if self.mode.shows_progress() => {
                self.theme.success.apply_to(transition.to_string()).to_string()
            }
            _ => return,
        };
        self.bar.println(line);
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("  {bar:32.magenta/dim} {percent:>3}% {msg}")
        .map(|s| s.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

impl ProgressReporter for TerminalReporter {
    fn report(&self, snapshot: Plan) {
        let mut previous = self.previous.borrow_mut();

        for transition in transitions(previous.as_ref(), &snapshot) {
            self.print(&transition);
        }

        self.bar.set_length(snapshot.len() as u64);
        self.bar.set_position(snapshot.cursor() as u64);
        self.bar
            .set_message(snapshot.current_label().unwrap_or_default().to_string());

        if snapshot.is_complete() && !self.bar.is_finished() {
            self.bar.finish_with_message("done");
        }

        *previous = Some(snapshot);
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}

/// Create the appropriate UI based on environment.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
