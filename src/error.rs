//! Error types for ordertrack operations.
//!
//! This module defines [`OrdertrackError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `OrdertrackError` for domain errors that callers render differently
//! - Individual operations report failures as `anyhow::Error`; the engine
//!   wraps them into [`OrdertrackError::OperationFailed`] with step and track
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

use crate::plan::Track;

/// Core error type for ordertrack operations.
#[derive(Debug, Error)]
pub enum OrdertrackError {
    /// Workflow kind is not one of the recognized kinds.
    #[error("Unknown workflow kind '{kind}' (expected 'listing' or 'order')")]
    UnknownKind { kind: String },

    /// Operation schedule does not fit the plan it is meant to drive.
    #[error("Schedule does not match plan layout: {message}")]
    LayoutMismatch { message: String },

    /// An operation failed while its step was executing.
    #[error("Step {step} ('{label}') failed on the {track} track: {message}")]
    OperationFailed {
        step: usize,
        label: String,
        track: Track,
        message: String,
    },

    /// The run was interrupted before the plan reached its end.
    #[error("Interrupted during step {step}")]
    Interrupted { step: usize },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or state file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A requested order or item record does not exist.
    #[error("No {what} record with id {id}")]
    RecordNotFound { what: &'static str, id: u64 },

    /// Fetching a record failed.
    #[error("Failed to fetch {what} record {id}: {message}")]
    RecordFetch {
        what: &'static str,
        id: u64,
        message: String,
    },

    /// The payment amount does not fit the balance type.
    #[error("Amount overflow: {price_per_row} per row x {rows} rows")]
    AmountOverflow { price_per_row: u128, rows: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ordertrack operations.
pub type Result<T> = std::result::Result<T, OrdertrackError>;
