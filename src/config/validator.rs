//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - The time unit must be positive
//! - Jitter must be a finite fraction between 0 and [`MAX_JITTER`]
//! - The longest simulated delay must fit in a `Duration`
//! - At most one record source may be configured

use std::time::Duration;

use crate::config::schema::OrdertrackConfig;
use crate::error::{OrdertrackError, Result};
use crate::plan::PlanKind;

/// Largest accepted jitter fraction.
pub const MAX_JITTER: f64 = 10.0;

/// Longest nominal duration, in time units, of any simulated operation.
fn longest_units(config: &OrdertrackConfig) -> u32 {
    [PlanKind::Listing, PlanKind::Order]
        .iter()
        .flat_map(|kind| kind.layout().iter())
        .flat_map(|layout| layout.durations.iter().flatten().copied())
        .chain(std::iter::once(config.chain_time))
        .max()
        .unwrap_or(config.chain_time)
}

/// Longest delay a simulated operation can sleep, with full jitter.
fn longest_delay(config: &OrdertrackConfig) -> Option<Duration> {
    let nominal = Duration::from_millis(config.time_unit_ms).checked_mul(longest_units(config))?;
    Duration::try_from_secs_f64(nominal.as_secs_f64() * (1.0 + config.jitter)).ok()
}

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &OrdertrackConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.time_unit_ms == 0 {
        errors.push(ValidationError::new(
            "zero-time-unit",
            "time_unit_ms must be greater than 0",
        ));
    }

    let jitter_ok = config.jitter.is_finite() && (0.0..=MAX_JITTER).contains(&config.jitter);
    if !jitter_ok {
        errors.push(ValidationError::new(
            "invalid-jitter",
            format!(
                "jitter must be a number between 0 and {}, got {}",
                MAX_JITTER, config.jitter
            ),
        ));
    }

    if config.time_unit_ms > 0 && jitter_ok && longest_delay(config).is_none() {
        errors.push(ValidationError::new(
            "delay-overflow",
            format!(
                "time_unit_ms {} times {} units is too long a delay",
                config.time_unit_ms,
                longest_units(config)
            ),
        ));
    }

    if config.records.catalog.is_some() && config.records.endpoint.is_some() {
        errors.push(ValidationError::new(
            "conflicting-records",
            "records.catalog and records.endpoint cannot both be set",
        ));
    }

    if config.records.timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "zero-timeout",
            "records.timeout_secs must be greater than 0",
        ));
    }

    errors
}

/// Validate and fail on the first batch of errors.
pub fn validate(config: &OrdertrackConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(OrdertrackError::ConfigValidationError { message })
}
