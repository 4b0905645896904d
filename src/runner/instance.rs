//! Opening a workflow instance.
//!
//! Opening `(kind, id)` either replays nothing (the instance finished
//! before) or drives a fresh plan through the [`Engine`], optionally
//! alongside another future such as a record fetch. Completion is
//! recorded only after the plan and the alongside work both succeed.

use std::fmt;
use std::future::{pending, ready, Future};

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::engine::{Engine, ProgressReporter, Schedule};
use crate::error::{OrdertrackError, Result};
use crate::plan::{Plan, PlanKind};
use crate::state::CompletionStore;

/// A workflow kind plus instance id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instance {
    pub kind: PlanKind,
    pub id: u64,
}

impl Instance {
    pub fn new(kind: PlanKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

/// Outcome of opening an instance.
#[derive(Debug)]
pub struct Visit<T> {
    /// Final plan, always complete.
    pub plan: Plan,

    /// True when the instance had finished before and nothing ran.
    pub revisited: bool,

    /// Output of the alongside future; `None` on a revisit.
    pub extra: Option<T>,
}

/// Opens workflow instances against a completion store.
pub struct InstanceRunner<'a> {
    reporter: &'a dyn ProgressReporter,
}

impl<'a> InstanceRunner<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter) -> Self {
        Self { reporter }
    }

    /// Open `instance`, running its plan if it has not finished before.
    pub async fn open(
        &self,
        instance: Instance,
        store: &mut CompletionStore,
        schedule: &Schedule,
    ) -> Result<Visit<()>> {
        self.open_with(instance, store, schedule, ready(Ok(())), pending())
            .await
    }

    /// Open `instance`, running `alongside` concurrently with the plan and
    /// stopping early if `shutdown` resolves.
    ///
    /// A finished instance reports exactly one snapshot (the terminal one);
    /// neither the schedule nor `alongside` is touched. Otherwise the
    /// initial snapshot is reported, then the engine's stream. The first
    /// error from either side ends the visit without recording completion.
    /// `shutdown` covers `alongside` too, including after the plan is done;
    /// interrupting it then fails with the step index equal to the plan
    /// length.
    pub async fn open_with<T, A, S>(
        &self,
        instance: Instance,
        store: &mut CompletionStore,
        schedule: &Schedule,
        alongside: A,
        shutdown: S,
    ) -> Result<Visit<T>>
    where
        A: Future<Output = Result<T>>,
        S: Future<Output = ()>,
    {
        if store.is_completed(instance.kind, instance.id) {
            info!("{} already finished", instance);
            let plan = Plan::finished(instance.kind);
            self.reporter.report(plan.clone());
            return Ok(Visit {
                plan,
                revisited: true,
                extra: None,
            });
        }

        let plan = Plan::new(instance.kind);
        schedule.check_fits(&plan)?;
        self.reporter.report(plan.clone());

        debug!("Running {}", instance);
        let total = plan.len();
        let shutdown = shutdown.shared();
        let engine = Engine::new(self.reporter);
        let alongside = async {
            tokio::select! {
                result = alongside => result,
                _ = shutdown.clone() => {
                    warn!("Interrupted while {} was still fetching", instance);
                    Err(OrdertrackError::Interrupted { step: total })
                }
            }
        };
        let (plan, extra) =
            futures::try_join!(engine.run_until(plan, schedule, shutdown.clone()), alongside)?;

        if store.record_completed(instance.kind, instance.id) {
            info!("{} finished", instance);
        }

        Ok(Visit {
            plan,
            revisited: false,
            extra: Some(extra),
        })
    }
}

/// Open `(kind, id)` with no alongside work and no shutdown signal.
pub async fn open_instance(
    kind: PlanKind,
    id: u64,
    store: &mut CompletionStore,
    schedule: &Schedule,
    reporter: &dyn ProgressReporter,
) -> Result<Visit<()>> {
    InstanceRunner::new(reporter)
        .open(Instance::new(kind, id), store, schedule)
        .await
}
