//! Status command implementation.
//!
//! The `ordertrack status` command shows which listings and orders have
//! finished, which orders are paid, and the most recent runs.

use std::time::Duration;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::plan::PlanKind;
use crate::state::{CompletionStore, RunStatus};
use crate::ui::{format_duration, format_relative_time, Table, UserInterface};

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};
use super::display::format_ids;

/// The status command implementation.
pub struct StatusCommand {
    project: ProjectContext,
    args: StatusArgs,
}

impl StatusCommand {
    pub fn new(project: ProjectContext, args: StatusArgs) -> Self {
        Self { project, args }
    }
}

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Success => "finished",
        RunStatus::Failed => "failed",
        RunStatus::Interrupted => "interrupted",
        RunStatus::Revisited => "revisited",
    }
}

impl Command for StatusCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = CompletionStore::load(self.project.root())?;
        let summary = store.status_summary();

        ui.show_header("Status");

        match summary.last_run {
            Some(ts) => ui.message(&format!("Last run: {}", format_relative_time(ts))),
            None => ui.message("No runs yet. Try 'ordertrack watch listing 1'."),
        }
        ui.message("");

        ui.message(&format!(
            "Listings finished ({}): {}",
            summary.listing_count,
            format_ids(store.completed(PlanKind::Listing))
        ));
        ui.message(&format!(
            "Orders finished ({}):   {}",
            summary.order_count,
            format_ids(store.completed(PlanKind::Order))
        ));
        ui.message(&format!(
            "Orders paid ({}):       {}",
            summary.paid_count,
            format_ids(&store.paid_orders)
        ));

        if !summary.unpaid_orders.is_empty() {
            let ids = summary.unpaid_orders.iter().copied().collect();
            ui.warning(&format!("Unpaid orders: {}", format_ids(&ids)));
        }

        let runs = store.run_history(self.args.runs);
        if !runs.is_empty() {
            let mut table = Table::new(vec!["When", "Workflow", "Status", "Duration"]);
            for run in runs {
                table.add_row(vec![
                    format_relative_time(run.timestamp),
                    format!("{} #{}", run.kind, run.id),
                    status_label(run.status).to_string(),
                    format_duration(Duration::from_millis(run.duration_ms)),
                ]);
            }
            ui.message("");
            ui.message(&table.render());
        }

        Ok(CommandResult::success())
    }
}
