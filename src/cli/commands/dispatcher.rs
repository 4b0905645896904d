//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::ProjectContext;

/// Trait for command implementations.
///
/// Commands run on a single-threaded runtime, so the returned futures
/// need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Command {
    /// Execute the command, reporting through `ui`.
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code: 0 on success, 1 on failure, 2 when a prerequisite is missing.
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project: ProjectContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            project: ProjectContext::new(project_root, config_path),
        }
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub async fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.project.clone();
        match &cli.command {
            Commands::Watch(args) => {
                super::watch::WatchCommand::new(project, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Plan(args) => {
                super::plan::PlanCommand::new(project, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Status(args) => {
                super::status::StatusCommand::new(project, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Pay(args) => {
                super::pay::PayCommand::new(project, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Result(args) => {
                super::result::ResultCommand::new(project, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Cid(args) => super::cid::CidCommand::new(args.clone()).execute(ui).await,
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone())
                    .execute(ui)
                    .await
            }
        }
    }
}
