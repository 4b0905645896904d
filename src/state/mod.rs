//! State management for completion sets and run history.
//!
//! This module provides persistent state storage for ordertrack projects,
//! tracking which workflow instances have finished, which orders are paid,
//! and the history of watches.

pub mod history;
pub mod store;

pub use history::{RunHistoryBuilder, RunRecord, RunStatus};
pub use store::{CompletionStore, StatusSummary};
