//! Staged multi-track execution.
//!
//! The [`Engine`] walks a [`Plan`](crate::plan::Plan) from its cursor to
//! the end. Each step's active operations, taken from a [`Schedule`], run
//! concurrently; steps run one after another. Every state change is
//! reported to a [`ProgressReporter`] as an owned snapshot.
//!
//! Everything runs on the caller's task. No threads are spawned and no
//! operation has a timeout; an operation that never finishes stalls its
//! step until the run is cancelled through [`Engine::run_until`].

pub mod executor;
pub mod operation;
pub mod reporter;
pub mod schedule;

pub use executor::Engine;
pub use operation::{Operation, SimulatedOperation, SimulationSettings};
pub use reporter::{CollectingReporter, ProgressReporter};
pub use schedule::Schedule;
