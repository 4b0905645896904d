//! Result command implementation.
//!
//! The `ordertrack result <id>` command shows where the encrypted result of
//! a finished, paid order lives.

use crate::cli::args::ResultArgs;
use crate::error::Result;
use crate::plan::PlanKind;
use crate::records::RecordSource;
use crate::state::CompletionStore;
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// The result command implementation.
pub struct ResultCommand {
    project: ProjectContext,
    args: ResultArgs,
}

impl ResultCommand {
    pub fn new(project: ProjectContext, args: ResultArgs) -> Self {
        Self { project, args }
    }
}

impl Command for ResultCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let id = self.args.id;
        let config = self.project.load_config()?;
        let store = CompletionStore::load(self.project.root())?;

        if !store.is_completed(PlanKind::Order, id) {
            ui.error(&format!(
                "Order #{} has not finished. Run 'ordertrack watch order {}' first.",
                id, id
            ));
            return Ok(CommandResult::failure(2));
        }
        if !store.is_paid(id) {
            ui.error(&format!(
                "Order #{} is not paid. Run 'ordertrack pay {}' first.",
                id, id
            ));
            return Ok(CommandResult::failure(2));
        }

        let Some(records) = self.project.records(&config)? else {
            ui.error("No record source configured. Set records.catalog or records.endpoint.");
            return Ok(CommandResult::failure(2));
        };

        let order = records.order(id).await?;
        match order.state.result_path {
            Some(path) => {
                ui.success(&format!("Result of order #{}", id));
                ui.message(&path);
                Ok(CommandResult::success())
            }
            None => {
                ui.warning(&format!("Order #{} has no result yet", id));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
