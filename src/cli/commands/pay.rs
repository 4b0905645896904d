//! Pay command implementation.
//!
//! The `ordertrack pay <id>` command records payment for a finished order
//! after showing what it costs and asking for confirmation.

use tracing::info;

use crate::cli::args::PayArgs;
use crate::error::Result;
use crate::plan::PlanKind;
use crate::records::fetch_payment;
use crate::state::CompletionStore;
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};
use super::display::show_payment;

/// The pay command implementation.
pub struct PayCommand {
    project: ProjectContext,
    args: PayArgs,
}

impl PayCommand {
    pub fn new(project: ProjectContext, args: PayArgs) -> Self {
        Self { project, args }
    }
}

impl Command for PayCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let id = self.args.id;
        let config = self.project.load_config()?;
        let mut store = CompletionStore::load(self.project.root())?;

        if !store.is_completed(PlanKind::Order, id) {
            ui.error(&format!(
                "Order #{} has not finished. Run 'ordertrack watch order {}' first.",
                id, id
            ));
            return Ok(CommandResult::failure(2));
        }

        if store.is_paid(id) {
            ui.success(&format!("Order #{} is already paid", id));
            return Ok(CommandResult::success());
        }

        if let Some(records) = self.project.records(&config)? {
            let payment = fetch_payment(&records, id).await?;
            show_payment(ui, &payment, config.payee.as_deref());
        }

        let confirmed =
            self.args.yes || ui.confirm("pay", &format!("Pay for order #{}?", id), false)?;
        if !confirmed {
            ui.warning("Payment cancelled");
            return Ok(CommandResult::failure(1));
        }

        store.record_payment(id);
        store.save(self.project.root())?;
        info!("Order #{} paid", id);
        ui.success(&format!("Order #{} paid", id));

        Ok(CommandResult::success())
    }
}
