//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`].

pub mod cid;
pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod display;
pub mod pay;
pub mod plan;
pub mod result;
pub mod status;
pub mod watch;

pub use context::ProjectContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
