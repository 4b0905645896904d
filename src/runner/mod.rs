//! Workflow instance orchestration.

pub mod instance;

pub use instance::{open_instance, Instance, InstanceRunner, Visit};
