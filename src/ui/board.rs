//! Rendering plans: the step table, the progress line, and what changed
//! between two snapshots.

use std::fmt;

use crate::plan::{OperationState, Plan, Track};

use super::table::Table;
use super::theme::OrdertrackTheme;

/// Marker for a whole step relative to the plan cursor.
pub fn step_marker(plan: &Plan, index: usize) -> OperationState {
    match plan.step(index) {
        Some(_) if index < plan.cursor() => OperationState::Done,
        Some(step) if index == plan.cursor() && !step.is_untouched() => OperationState::Running,
        _ => OperationState::Pending,
    }
}

fn styled_marker(state: OperationState, theme: &OrdertrackTheme) -> String {
    let c = state.display_char().to_string();
    match state {
        OperationState::Done => theme.success.apply_to(c).to_string(),
        OperationState::Running => theme.info.apply_to(c).to_string(),
        OperationState::Pending => theme.dim.apply_to(c).to_string(),
        OperationState::Inactive => c,
    }
}

/// Box-drawn table with one row per step and one column per track.
pub fn render_plan(plan: &Plan, theme: &OrdertrackTheme) -> String {
    let mut headers = vec!["Step"];
    headers.extend(Track::ALL.iter().map(|t| t.title()));
    let mut table = Table::new(headers);

    for (index, step) in plan.steps().iter().enumerate() {
        let mut row = vec![format!(
            "{} {}",
            styled_marker(step_marker(plan, index), theme),
            step.label()
        )];
        row.extend(
            Track::ALL
                .iter()
                .map(|t| styled_marker(step.state(*t), theme)),
        );
        table.add_row(row);
    }

    table.render()
}

/// One-line summary: percent, position, and the current step.
pub fn progress_line(plan: &Plan) -> String {
    match plan.current_label() {
        Some(label) => format!(
            "{:>3}% · step {}/{} · {}",
            plan.percent(),
            plan.cursor() + 1,
            plan.len(),
            label
        ),
        None => format!("{:>3}% · done", plan.percent()),
    }
}

/// A change observed between two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Operation {
        step: usize,
        label: String,
        track: Track,
        state: OperationState,
    },
    StepDone {
        step: usize,
        label: String,
        total: usize,
    },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Operation {
                label,
                track,
                state,
                ..
            } => write!(
                f,
                "  {} {} · {} {}",
                state.display_char(),
                label,
                track.title(),
                state
            ),
            Transition::StepDone { step, label, total } => {
                write!(f, "✓ [{}/{}] {}", step + 1, total, label)
            }
        }
    }
}

/// Changes from `prev` to `next`, operations first, then finished steps.
///
/// Without a previous snapshot nothing is reported.
pub fn transitions(prev: Option<&Plan>, next: &Plan) -> Vec<Transition> {
    let Some(prev) = prev else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for (index, (before, after)) in prev.steps().iter().zip(next.steps()).enumerate() {
        for track in Track::ALL {
            if before.state(track) != after.state(track) {
                out.push(Transition::Operation {
                    step: index,
                    label: after.label().to_string(),
                    track,
                    state: after.state(track),
                });
            }
        }
    }

    for index in prev.cursor()..next.cursor() {
        if let Some(step) = next.step(index) {
            out.push(Transition::StepDone {
                step: index,
                label: step.label().to_string(),
                total: next.len(),
            });
        }
    }

    out
}
