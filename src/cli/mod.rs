//! Command-line interface for ordertrack.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CidArgs, Cli, Commands, CompletionsArgs, PayArgs, PlanArgs, ResultArgs, StatusArgs, WatchArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, ProjectContext};
