//! Progress sinks.

use std::cell::RefCell;

use crate::plan::Plan;

/// Receives a snapshot after every plan mutation.
///
/// Snapshots are owned values; a reporter may keep them as long as it
/// likes without observing later changes.
pub trait ProgressReporter {
    fn report(&self, snapshot: Plan);
}

impl<F> ProgressReporter for F
where
    F: Fn(Plan),
{
    fn report(&self, snapshot: Plan) {
        self(snapshot)
    }
}

/// Reporter that keeps every snapshot it receives.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    snapshots: RefCell<Vec<Plan>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far, oldest first.
    pub fn snapshots(&self) -> Vec<Plan> {
        self.snapshots.borrow().clone()
    }

    /// Number of snapshots received.
    pub fn len(&self) -> usize {
        self.snapshots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.borrow().is_empty()
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<Plan> {
        self.snapshots.borrow().last().cloned()
    }

    pub fn into_inner(self) -> Vec<Plan> {
        self.snapshots.into_inner()
    }
}

impl ProgressReporter for CollectingReporter {
    fn report(&self, snapshot: Plan) {
        self.snapshots.borrow_mut().push(snapshot);
    }
}
