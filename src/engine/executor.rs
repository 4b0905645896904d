//! Step-by-step plan execution.

use futures::future::try_join_all;
use std::cell::RefCell;
use std::future::{pending, Future};
use tracing::{debug, warn};

use crate::error::{OrdertrackError, Result};
use crate::plan::{OperationState, Plan, Track};

use super::reporter::ProgressReporter;
use super::schedule::Schedule;

/// Drives a plan from its cursor to the end.
///
/// Steps run strictly in order. Inside a step every active operation runs
/// concurrently on the calling task; the step finishes when all of them
/// have. A snapshot is reported after each operation starts, after each
/// one finishes, and after the cursor moves.
pub struct Engine<'r> {
    reporter: &'r dyn ProgressReporter,
}

impl<'r> Engine<'r> {
    pub fn new(reporter: &'r dyn ProgressReporter) -> Self {
        Self { reporter }
    }

    /// Run `plan` to completion.
    pub async fn run(&self, plan: Plan, schedule: &Schedule) -> Result<Plan> {
        self.run_until(plan, schedule, pending::<()>()).await
    }

    /// Run `plan` until it completes or `shutdown` resolves.
    ///
    /// On shutdown the in-flight step is dropped where it stands and the
    /// run fails with [`OrdertrackError::Interrupted`]. On an operation
    /// failure the remaining operations of that step are dropped too; the
    /// cursor stays on the failed step.
    pub async fn run_until<S>(&self, plan: Plan, schedule: &Schedule, shutdown: S) -> Result<Plan>
    where
        S: Future<Output = ()>,
    {
        schedule.check_fits(&plan)?;

        let total = plan.len();
        let plan = RefCell::new(plan);
        tokio::pin!(shutdown);

        loop {
            let index = plan.borrow().cursor();
            if index >= total {
                break;
            }
            debug!("exec step {} / {}", index + 1, total);

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    warn!("Interrupted during step {}", index + 1);
                    return Err(OrdertrackError::Interrupted { step: index });
                }
                result = self.run_step(&plan, schedule, index) => result?,
            }

            let snapshot = {
                let mut plan = plan.borrow_mut();
                plan.advance_cursor();
                plan.clone()
            };
            self.reporter.report(snapshot);
            debug!("step {} done", index + 1);
        }

        Ok(plan.into_inner())
    }

    async fn run_step(&self, plan: &RefCell<Plan>, schedule: &Schedule, index: usize) -> Result<()> {
        let tracks: Vec<Track> = match plan.borrow().step(index) {
            Some(step) => step.active_tracks().collect(),
            None => return Ok(()),
        };

        try_join_all(
            tracks
                .into_iter()
                .map(|track| self.run_operation(plan, schedule, index, track)),
        )
        .await?;

        Ok(())
    }

    async fn run_operation(
        &self,
        plan: &RefCell<Plan>,
        schedule: &Schedule,
        index: usize,
        track: Track,
    ) -> Result<()> {
        let operation = schedule.operation(index, track).ok_or_else(|| {
            OrdertrackError::LayoutMismatch {
                message: format!("step {} has no operation on the {} track", index, track),
            }
        })?;

        self.transition(plan, index, track, OperationState::Running);

        if let Err(e) = operation.run().await {
            let label = plan
                .borrow()
                .step(index)
                .map(|s| s.label().to_string())
                .unwrap_or_default();
            warn!("Step {} ('{}') failed on {}: {:#}", index + 1, label, track, e);
            return Err(OrdertrackError::OperationFailed {
                step: index,
                label,
                track,
                message: format!("{:#}", e),
            });
        }

        self.transition(plan, index, track, OperationState::Done);
        Ok(())
    }

    fn transition(&self, plan: &RefCell<Plan>, index: usize, track: Track, next: OperationState) {
        let snapshot = {
            let mut plan = plan.borrow_mut();
            plan.set_state(index, track, next);
            plan.clone()
        };
        self.reporter.report(snapshot);
    }
}
