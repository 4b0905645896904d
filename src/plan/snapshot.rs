//! The plan value handed to progress reporters.
//!
//! Steps are held behind [`Arc`] so that cloning a plan is a pointer copy per
//! step. Mutation goes through [`Arc::make_mut`], which copies a step only
//! when an earlier snapshot still shares it; a snapshot that has been handed
//! out is therefore never changed underneath its holder.

use std::sync::Arc;

use super::kind::PlanKind;
use super::step::{OperationState, Step};
use super::track::Track;

/// Ordered steps of one workflow instance plus the completion cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    kind: PlanKind,
    steps: Vec<Arc<Step>>,
    cursor: usize,
    generation: u64,
}

impl Plan {
    /// Fresh plan for `kind` with the cursor at the first step.
    pub fn new(kind: PlanKind) -> Self {
        let steps = kind
            .layout()
            .iter()
            .map(|l| Arc::new(Step::new(l.label, l.active())))
            .collect();

        Self {
            kind,
            steps,
            cursor: 0,
            generation: 0,
        }
    }

    /// Plan for an instance that already finished: every active slot is
    /// `done` and the cursor sits at the end.
    pub fn finished(kind: PlanKind) -> Self {
        let mut plan = Self::new(kind);
        for step in &mut plan.steps {
            Arc::make_mut(step).mark_all_done();
        }
        plan.cursor = plan.steps.len();
        plan
    }

    /// Workflow kind this plan was built for.
    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Arc<Step>] {
        &self.steps
    }

    /// Step at `index`.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index).map(|s| s.as_ref())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the first step that has not finished.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of mutations applied since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the cursor has reached the end.
    pub fn is_complete(&self) -> bool {
        self.cursor == self.steps.len()
    }

    /// Completed share of the plan, rounded down.
    pub fn percent(&self) -> u8 {
        if self.steps.is_empty() {
            return 100;
        }
        (100 * self.cursor / self.steps.len()) as u8
    }

    /// Label of the step under the cursor, if any remain.
    pub fn current_label(&self) -> Option<&str> {
        self.step(self.cursor).map(|s| s.label())
    }

    /// Check the cursor invariant: steps before the cursor are done, steps
    /// after it are untouched.
    pub fn is_consistent(&self) -> bool {
        self.cursor <= self.steps.len()
            && self.steps[..self.cursor].iter().all(|s| s.is_done())
            && self
                .steps
                .iter()
                .skip(self.cursor + 1)
                .all(|s| s.is_untouched())
    }

    pub(crate) fn set_state(&mut self, index: usize, track: Track, next: OperationState) {
        Arc::make_mut(&mut self.steps[index]).set_state(track, next);
        self.generation += 1;
    }

    pub(crate) fn advance_cursor(&mut self) {
        debug_assert!(self.steps[self.cursor].is_done());
        self.cursor += 1;
        self.generation += 1;
    }
}
