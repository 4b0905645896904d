//! Plan data model.
//!
//! A [`Plan`] is the ordered list of [`Step`]s for one workflow instance
//! plus a cursor pointing at the first step that has not finished. Every
//! step has one slot per [`Track`]; a slot is either [`OperationState::Inactive`]
//! (the track takes no part in that step) or moves through
//! `pending → running → done`.
//!
//! # Example
//!
//! ```
//! use ordertrack::plan::{Plan, PlanKind, Track, OperationState};
//!
//! let plan = Plan::new(PlanKind::Listing);
//! assert_eq!(plan.len(), 3);
//! assert_eq!(plan.cursor(), 0);
//! assert_eq!(plan.steps()[1].state(Track::Ledger), OperationState::Pending);
//! assert_eq!(plan.steps()[1].state(Track::Enclave), OperationState::Inactive);
//! ```

pub mod kind;
pub mod snapshot;
pub mod step;
pub mod track;

pub use kind::{PlanKind, StepLayout, CHAIN_TIME};
pub use snapshot::Plan;
pub use step::{OperationState, Step};
pub use track::{Track, TRACK_COUNT};
