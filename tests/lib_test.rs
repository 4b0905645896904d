//! Integration tests for the library API: opening instances end to end.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use ordertrack::engine::{CollectingReporter, Operation, Schedule, SimulationSettings};
use ordertrack::plan::{OperationState, Plan, PlanKind, Track};
use ordertrack::runner::open_instance;
use ordertrack::state::CompletionStore;
use ordertrack::OrdertrackError;
use tempfile::TempDir;

fn settings() -> SimulationSettings {
    SimulationSettings::exact(Duration::from_millis(10))
}

/// Schedule whose every operation bumps `calls` and then sleeps like the
/// simulated one would.
fn counting_schedule(kind: PlanKind, calls: &Rc<Cell<usize>>) -> Schedule {
    Schedule::uniform(kind, |_, _| {
        let calls = Rc::clone(calls);
        let op = move || {
            calls.set(calls.get() + 1);
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(())
            }
        };
        Box::new(op) as Box<dyn Operation>
    })
}

#[tokio::test(start_paused = true)]
async fn finished_order_short_circuits() {
    let mut store = CompletionStore::new();
    store.record_completed(PlanKind::Order, 7);
    let calls = Rc::new(Cell::new(0));
    let schedule = counting_schedule(PlanKind::Order, &calls);
    let reporter = CollectingReporter::new();

    let visit = open_instance(PlanKind::Order, 7, &mut store, &schedule, &reporter)
        .await
        .unwrap();

    assert!(visit.revisited);
    assert_eq!(calls.get(), 0);
    assert_eq!(reporter.len(), 1);
    assert_eq!(reporter.last().unwrap(), Plan::finished(PlanKind::Order));
}

#[tokio::test(start_paused = true)]
async fn listing_end_to_end() {
    let mut store = CompletionStore::new();
    let schedule = Schedule::simulated(PlanKind::Listing, &settings());
    let reporter = CollectingReporter::new();

    let visit = open_instance(PlanKind::Listing, 1, &mut store, &schedule, &reporter)
        .await
        .unwrap();

    assert_eq!(visit.plan.cursor(), 3);
    for step in visit.plan.steps() {
        assert!(step.is_done());
    }
    assert_eq!(store.completed(PlanKind::Listing).len(), 1);

    // A second visit neither runs nor duplicates the completion.
    let again = open_instance(PlanKind::Listing, 1, &mut store, &schedule, &reporter)
        .await
        .unwrap();
    assert!(again.revisited);
    assert_eq!(store.completed(PlanKind::Listing).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn snapshots_never_regress() {
    let mut store = CompletionStore::new();
    let schedule = Schedule::simulated(PlanKind::Order, &settings());
    let reporter = CollectingReporter::new();

    open_instance(PlanKind::Order, 3, &mut store, &schedule, &reporter)
        .await
        .unwrap();

    let snapshots = reporter.into_inner();
    for pair in snapshots.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        assert!(after.cursor() >= before.cursor());
        for (a, b) in before.steps().iter().zip(after.steps()) {
            for track in Track::ALL {
                let (from, to) = (a.state(track), b.state(track));
                assert!(from == to || from.can_become(to), "{} -> {}", from, to);
            }
        }
        assert!(after.is_consistent());
    }
}

#[tokio::test(start_paused = true)]
async fn order_failure_leaves_store_untouched() {
    let mut store = CompletionStore::new();
    let calls = Rc::new(Cell::new(0));
    let failing = || async { Err::<(), _>(anyhow::anyhow!("signer unavailable")) };
    let schedule = counting_schedule(PlanKind::Order, &calls).set(1, Track::Local, failing);
    let reporter = CollectingReporter::new();

    let err = open_instance(PlanKind::Order, 2, &mut store, &schedule, &reporter)
        .await
        .unwrap_err();

    match err {
        OrdertrackError::OperationFailed {
            step, track, label, ..
        } => {
            assert_eq!(step, 1);
            assert_eq!(track, Track::Local);
            assert_eq!(label, "Submit on-chain");
        }
        other => panic!("unexpected error: {}", other),
    }

    let last = reporter.last().unwrap();
    assert_eq!(last.cursor(), 1);
    assert_eq!(last.steps()[1].state(Track::Local), OperationState::Running);
    assert!(!store.is_completed(PlanKind::Order, 2));
    // Only step 0's single operation and the ledger half of step 1 could start.
    assert!(calls.get() <= 2);
}

#[tokio::test(start_paused = true)]
async fn store_round_trips_through_disk() {
    let temp = TempDir::new().unwrap();
    let mut store = CompletionStore::load(temp.path()).unwrap();
    let schedule = Schedule::simulated(PlanKind::Listing, &settings());
    let reporter = CollectingReporter::new();

    open_instance(PlanKind::Listing, 9, &mut store, &schedule, &reporter)
        .await
        .unwrap();
    store.save(temp.path()).unwrap();

    let reloaded = CompletionStore::load(temp.path()).unwrap();
    assert!(reloaded.is_completed(PlanKind::Listing, 9));
}
