//! User interface: rendering plans and talking to the user.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage, with a live progress bar
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use ordertrack::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Computation order");
//! ui.success("Order #7 complete");
//! ```

pub mod board;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use board::{progress_line, render_plan, transitions, Transition};
pub use mock::{MockReporter, MockUI};
pub use non_interactive::{LineReporter, NonInteractiveUI};
pub use output::OutputMode;
pub use progress::{format_duration, format_relative_time};
pub use table::Table;
pub use terminal::{create_ui, TerminalReporter, TerminalUI};
pub use theme::{should_use_colors, OrdertrackTheme};

use crate::engine::ProgressReporter;
use crate::error::Result;
use crate::plan::Plan;

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

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show the full step table for a plan.
    fn show_plan(&mut self, plan: &Plan);

    /// Ask a yes/no question. `key` identifies the question for overrides.
    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool>;

    /// Reporter that renders live progress of a running plan.
    fn progress_reporter(&self) -> Box<dyn ProgressReporter>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
