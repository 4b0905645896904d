//! Plan command implementation.
//!
//! The `ordertrack plan <kind>` command shows the steps a workflow kind goes
//! through and which tracks take part in each. Durations are the ones
//! `watch` would run with the project's configuration.

use serde_json::json;

use crate::cli::args::PlanArgs;
use crate::error::Result;
use crate::plan::{Plan, Track};
use crate::ui::UserInterface;

use super::context::ProjectContext;
use super::dispatcher::{Command, CommandResult};

/// The plan command implementation.
pub struct PlanCommand {
    project: ProjectContext,
    args: PlanArgs,
}

impl PlanCommand {
    pub fn new(project: ProjectContext, args: PlanArgs) -> Self {
        Self { project, args }
    }
}

impl Command for PlanCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let kind = self.args.kind;
        let settings = self.project.load_config()?.simulation();

        if self.args.json {
            let steps: Vec<_> = kind
                .layout()
                .iter()
                .map(|layout| {
                    let tracks: serde_json::Map<_, _> = Track::ALL
                        .iter()
                        .filter_map(|t| {
                            settings.units(layout, *t).map(|d| (t.to_string(), json!(d)))
                        })
                        .collect();
                    json!({ "label": layout.label, "durations": tracks })
                })
                .collect();
            let doc = json!({ "kind": kind, "title": kind.title(), "steps": steps });
            let text = serde_json::to_string_pretty(&doc).map_err(anyhow::Error::from)?;
            println!("{}", text);
            return Ok(CommandResult::success());
        }

        ui.show_header(kind.title());
        ui.show_plan(&Plan::new(kind));
        ui.message(&format!(
            "{} steps; durations in time units: {}",
            kind.layout().len(),
            kind.layout()
                .iter()
                .map(|layout| {
                    Track::ALL
                        .iter()
                        .filter_map(|t| settings.units(layout, *t))
                        .max()
                        .unwrap_or(0)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" → ")
        ));

        Ok(CommandResult::success())
    }
}
