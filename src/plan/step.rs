//! Steps and per-track operation states.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::track::{Track, TRACK_COUNT};

/// Lifecycle of one (step, track) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationState {
    /// No operation exists for this track in this step. Never changes.
    Inactive,

    /// Operation exists and has not started.
    Pending,

    /// Operation is in flight.
    Running,

    /// Operation completed.
    Done,
}

impl OperationState {
    /// Whether the slot has an operation at all.
    pub fn is_active(&self) -> bool {
        !matches!(self, OperationState::Inactive)
    }

    /// Whether moving to `next` respects `pending → running → done`.
    pub fn can_become(&self, next: OperationState) -> bool {
        matches!(
            (self, next),
            (OperationState::Pending, OperationState::Running)
                | (OperationState::Running, OperationState::Done)
        )
    }

    /// Get a display character for this state.
    pub fn display_char(&self) -> char {
        match self {
            OperationState::Inactive => ' ',
            OperationState::Pending => '○',
            OperationState::Running => '◉',
            OperationState::Done => '✓',
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationState::Inactive => "inactive",
            OperationState::Pending => "pending",
            OperationState::Running => "running",
            OperationState::Done => "done",
        };
        write!(f, "{}", s)
    }
}

/// One phase of a workflow with a slot per track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    label: String,
    states: [OperationState; TRACK_COUNT],
}

impl Step {
    /// Create a step; active tracks start `pending`, the rest `inactive`.
    pub fn new(label: &str, active: [bool; TRACK_COUNT]) -> Self {
        let states = active.map(|on| {
            if on {
                OperationState::Pending
            } else {
                OperationState::Inactive
            }
        });
        Self {
            label: label.to_string(),
            states,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// State of the slot for `track`.
    pub fn state(&self, track: Track) -> OperationState {
        self.states[track.index()]
    }

    /// All slot states in track order.
    pub fn states(&self) -> &[OperationState; TRACK_COUNT] {
        &self.states
    }

    /// Tracks that take part in this step.
    pub fn active_tracks(&self) -> impl Iterator<Item = Track> + '_ {
        Track::ALL
            .into_iter()
            .filter(move |t| self.state(*t).is_active())
    }

    /// Number of tracks that take part in this step.
    pub fn active_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_active()).count()
    }

    /// True when every active slot is `done`.
    pub fn is_done(&self) -> bool {
        self.states
            .iter()
            .all(|s| !s.is_active() || *s == OperationState::Done)
    }

    /// True when no active slot has left `pending`.
    pub fn is_untouched(&self) -> bool {
        self.states
            .iter()
            .all(|s| matches!(s, OperationState::Inactive | OperationState::Pending))
    }

    pub(crate) fn set_state(&mut self, track: Track, next: OperationState) {
        let slot = &mut self.states[track.index()];
        debug_assert!(
            slot.can_become(next),
            "illegal transition {} -> {} on {} track of '{}'",
            slot,
            next,
            track,
            self.label
        );
        *slot = next;
    }

    pub(crate) fn mark_all_done(&mut self) {
        for slot in self.states.iter_mut().filter(|s| s.is_active()) {
            *slot = OperationState::Done;
        }
    }
}
