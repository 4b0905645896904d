//! Run history recording.
//!
//! This module provides types for recording workflow instance visits,
//! including the [`RunRecord`] struct and [`RunHistoryBuilder`] for
//! building records while a run is in progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::PlanKind;

/// A record of a single `watch` of a workflow instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// When the run started.
    pub timestamp: DateTime<Utc>,

    /// Which workflow kind was watched.
    pub kind: PlanKind,

    /// Instance id.
    pub id: u64,

    /// Total duration in milliseconds.
    pub duration_ms: u64,

    /// Overall status.
    pub status: RunStatus,

    /// Any error message if failed.
    pub error: Option<String>,
}

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Success,
    Failed,
    Interrupted,
    /// The instance had already completed; nothing ran.
    Revisited,
}

/// Helper for building run history.
pub struct RunHistoryBuilder {
    kind: PlanKind,
    id: u64,
    start_time: DateTime<Utc>,
}

impl RunHistoryBuilder {
    /// Start a new run record.
    pub fn start(kind: PlanKind, id: u64) -> Self {
        Self {
            kind,
            id,
            start_time: Utc::now(),
        }
    }

    fn finish(self, status: RunStatus, error: Option<String>) -> RunRecord {
        RunRecord {
            timestamp: self.start_time,
            kind: self.kind,
            id: self.id,
            duration_ms: (Utc::now() - self.start_time).num_milliseconds().max(0) as u64,
            status,
            error,
        }
    }

    /// Finish with success.
    pub fn finish_success(self) -> RunRecord {
        self.finish(RunStatus::Success, None)
    }

    /// Finish with failure.
    pub fn finish_failed(self, error: &str) -> RunRecord {
        self.finish(RunStatus::Failed, Some(error.to_string()))
    }

    /// Finish as interrupted.
    pub fn finish_interrupted(self) -> RunRecord {
        self.finish(RunStatus::Interrupted, None)
    }

    /// Finish for an instance that was already complete.
    pub fn finish_revisited(self) -> RunRecord {
        self.finish(RunStatus::Revisited, None)
    }
}
