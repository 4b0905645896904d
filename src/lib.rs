//! Ordertrack - step-by-step progress for dataset listings and computation
//! orders.
//!
//! A listing (publishing a dataset) or an order (running a query against a
//! listed dataset) goes through a fixed sequence of steps. Each step runs
//! operations on up to three tracks at once: the local machine, a trusted
//! execution environment, and the chain. Ordertrack drives those operations,
//! reports a fresh snapshot of the plan after every change, and remembers
//! which instances have finished.
//!
//! # Modules
//!
//! - [`plan`] - Workflow kinds, steps, and the plan snapshot value
//! - [`engine`] - Operations, schedules, and the execution engine
//! - [`runner`] - Opening an instance against the completion store
//! - [`state`] - Completion store and run history
//! - [`records`] - Order and item records, and pricing
//! - [`config`] - Configuration loading and validation
//! - [`cid`] - Content identifiers for dataset files
//! - [`cli`] - Command-line interface
//! - [`ui`] - Terminal output, progress rendering, and prompts
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use ordertrack::engine::{CollectingReporter, Schedule, SimulationSettings};
//! use ordertrack::plan::PlanKind;
//! use ordertrack::runner::open_instance;
//! use ordertrack::state::CompletionStore;
//! use std::time::Duration;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let settings = SimulationSettings::exact(Duration::from_millis(1));
//! let schedule = Schedule::simulated(PlanKind::Listing, &settings);
//! let reporter = CollectingReporter::new();
//! let mut store = CompletionStore::new();
//!
//! let visit = open_instance(PlanKind::Listing, 1, &mut store, &schedule, &reporter)
//!     .await
//!     .unwrap();
//! assert!(visit.plan.is_complete());
//! assert!(store.is_completed(PlanKind::Listing, 1));
//! # });
//! ```

pub mod cid;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod records;
pub mod runner;
pub mod state;
pub mod ui;

pub use error::{OrdertrackError, Result};
