//! Watch command implementation.
//!
//! The `ordertrack watch <kind> <id>` command opens a workflow instance and
//! follows its plan to the end. For orders with a record source configured,
//! the order and its item are fetched while the plan runs and the amount due
//! is shown once it finishes.

use tracing::warn;

use crate::cli::args::WatchArgs;
use crate::engine::Schedule;
use crate::error::{OrdertrackError, Result};
use crate::plan::PlanKind;
use crate::records::{fetch_payment, Payment, Records};
use crate::runner::{Instance, InstanceRunner};
use crate::state::{CompletionStore, RunHistoryBuilder};
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};
use super::display::show_payment;

/// The watch command implementation.
pub struct WatchCommand {
    project: ProjectContext,
    args: WatchArgs,
}

impl WatchCommand {
    pub fn new(project: ProjectContext, args: WatchArgs) -> Self {
        Self { project, args }
    }

    pub fn args(&self) -> &WatchArgs {
        &self.args
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn fetch_for(records: Option<&Records>, instance: Instance) -> Result<Option<Payment>> {
    match (records, instance.kind) {
        (Some(records), PlanKind::Order) => fetch_payment(records, instance.id).await.map(Some),
        _ => Ok(None),
    }
}

impl Command for WatchCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.project.load_config()?;
        let records = self.project.records(&config)?;
        let mut store = CompletionStore::load(self.project.root())?;

        let instance = Instance::new(self.args.kind, self.args.id);
        let schedule = Schedule::simulated(instance.kind, &config.simulation());

        ui.show_header(&format!("{} · {}", instance.kind.title(), instance));

        let history = RunHistoryBuilder::start(instance.kind, instance.id);
        let reporter = ui.progress_reporter();
        let outcome = InstanceRunner::new(reporter.as_ref())
            .open_with(
                instance,
                &mut store,
                &schedule,
                fetch_for(records.as_ref(), instance),
                shutdown_signal(),
            )
            .await;
        drop(reporter);

        let (result, visit) = match outcome {
            Ok(visit) if visit.revisited => {
                store.record_run(history.finish_revisited());
                ui.success(&format!("{} already finished", instance));
                (CommandResult::success(), Some(visit))
            }
            Ok(visit) => {
                store.record_run(history.finish_success());
                ui.success(&format!("{} finished", instance));
                (CommandResult::success(), Some(visit))
            }
            Err(OrdertrackError::Interrupted { step }) => {
                store.record_run(history.finish_interrupted());
                let during = if step < instance.kind.layout().len() {
                    format!("during step {}", step + 1)
                } else {
                    "while fetching order details".to_string()
                };
                ui.warning(&format!("Interrupted {}; {} is not finished", during, instance));
                (CommandResult::failure(1), None)
            }
            Err(e) => {
                store.record_run(history.finish_failed(&e.to_string()));
                ui.error(&e.to_string());
                (CommandResult::failure(1), None)
            }
        };

        store.prune_history(config.history_retention);
        store.save(self.project.root())?;

        let Some(visit) = visit else {
            return Ok(result);
        };
        ui.show_plan(&visit.plan);

        let payment = match visit.extra.flatten() {
            Some(payment) => Some(payment),
            // A revisit runs nothing alongside; fetch now.
            None if visit.revisited => {
                let fetched = tokio::select! {
                    result = fetch_for(records.as_ref(), instance) => Some(result),
                    _ = shutdown_signal() => None,
                };
                match fetched {
                    Some(Ok(payment)) => payment,
                    Some(Err(e)) => {
                        ui.warning(&format!("Could not fetch order details: {}", e));
                        None
                    }
                    None => {
                        ui.warning("Interrupted while fetching order details");
                        None
                    }
                }
            }
            None => None,
        };

        if let Some(payment) = payment {
            show_payment(ui, &payment, config.payee.as_deref());
            if !store.is_paid(instance.id) {
                ui.message(&format!(
                    "Run 'ordertrack pay {}' to pay for this order.",
                    instance.id
                ));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RunStatus;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
orders:
  - id: 2
    details: { item_id: 1 }
    state: { matched_rows: 40, result_path: /ipfs/QmResult }
items:
  - id: 1
    details:
      name: Weather 2020
      price:
        PerRow:
          price: 25
"#;

    fn project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".ordertrack");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    fn fast_project() -> TempDir {
        project("time_unit_ms: 1\njitter: 0\nchain_time: 1\n")
    }

    fn watch(root: &Path, kind: PlanKind, id: u64) -> WatchCommand {
        WatchCommand::new(
            ProjectContext::new(root.to_path_buf(), None),
            WatchArgs {
                kind,
                id,
                non_interactive: true,
            },
        )
    }

    #[tokio::test]
    async fn watch_listing_records_completion() {
        let temp = fast_project();
        let mut ui = MockUI::new();

        let result = watch(temp.path(), PlanKind::Listing, 1)
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("listing #1 finished"));
        assert!(ui.snapshots().last().unwrap().is_complete());

        let store = CompletionStore::load(temp.path()).unwrap();
        assert!(store.is_completed(PlanKind::Listing, 1));
        assert_eq!(store.last_run_record().unwrap().status, RunStatus::Success);
    }

    #[tokio::test]
    async fn second_watch_is_a_revisit() {
        let temp = fast_project();
        let mut ui = MockUI::new();
        watch(temp.path(), PlanKind::Listing, 1)
            .execute(&mut ui)
            .await
            .unwrap();

        let mut ui = MockUI::new();
        let result = watch(temp.path(), PlanKind::Listing, 1)
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("already finished"));
        assert_eq!(ui.snapshots().len(), 1);

        let store = CompletionStore::load(temp.path()).unwrap();
        assert_eq!(store.completed(PlanKind::Listing).len(), 1);
        assert_eq!(store.run_history(10).len(), 2);
        assert_eq!(store.last_run_record().unwrap().status, RunStatus::Revisited);
    }

    #[tokio::test]
    async fn watch_order_shows_amount_due() {
        let temp = project(
            "time_unit_ms: 1\njitter: 0\nchain_time: 1\nrecords:\n  catalog: catalog.yml\n",
        );
        fs::write(temp.path().join("catalog.yml"), CATALOG).unwrap();
        let mut ui = MockUI::new();

        let result = watch(temp.path(), PlanKind::Order, 2)
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("Amount due:    1,000"));
        assert!(ui.has_message("ordertrack pay 2"));
    }

    #[tokio::test]
    async fn missing_order_record_fails_the_visit() {
        let temp = project(
            "time_unit_ms: 1\njitter: 0\nchain_time: 1\nrecords:\n  catalog: catalog.yml\n",
        );
        fs::write(temp.path().join("catalog.yml"), CATALOG).unwrap();
        let mut ui = MockUI::new();

        let result = watch(temp.path(), PlanKind::Order, 9)
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("No order record with id 9"));

        let store = CompletionStore::load(temp.path()).unwrap();
        assert!(!store.is_completed(PlanKind::Order, 9));
        assert_eq!(store.last_run_record().unwrap().status, RunStatus::Failed);
    }

    #[tokio::test]
    async fn invalid_config_is_an_error() {
        let temp = project("jitter: -1\n");
        let mut ui = MockUI::new();

        let err = watch(temp.path(), PlanKind::Order, 1)
            .execute(&mut ui)
            .await
            .unwrap_err();
        assert!(matches!(err, OrdertrackError::ConfigValidationError { .. }));
    }
}
