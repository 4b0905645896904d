//! Persistent state storage.
//!
//! This module provides the completion store for a project: which
//! listings and orders have finished, which orders have been paid, and
//! the run history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OrdertrackError, Result};
use crate::plan::PlanKind;

use super::RunRecord;

/// Persistent state for a project.
///
/// Id sets only grow. Recording an id that is already present changes
/// nothing, so a store can be replayed safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionStore {
    /// Schema version for migration.
    pub version: u32,

    /// Last run timestamp.
    pub last_run: Option<DateTime<Utc>>,

    /// Listings whose workflow finished.
    #[serde(default)]
    pub listings: BTreeSet<u64>,

    /// Orders whose workflow finished.
    #[serde(default)]
    pub orders: BTreeSet<u64>,

    /// Orders that have been paid for.
    #[serde(default)]
    pub paid_orders: BTreeSet<u64>,

    /// Run history (most recent first).
    #[serde(default)]
    pub runs: Vec<RunRecord>,
}

/// Summary for status command.
#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub last_run: Option<DateTime<Utc>>,
    pub listing_count: usize,
    pub order_count: usize,
    pub paid_count: usize,
    pub unpaid_orders: Vec<u64>,
}

impl Default for CompletionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionStore {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Default number of runs to keep.
    pub const DEFAULT_HISTORY_RETENTION: usize = 50;

    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            last_run: None,
            listings: BTreeSet::new(),
            orders: BTreeSet::new(),
            paid_orders: BTreeSet::new(),
            runs: Vec::new(),
        }
    }

    /// Get the state directory for a project.
    pub fn state_dir(project_root: &Path) -> PathBuf {
        project_root.join(".ordertrack")
    }

    /// Get the state file path.
    pub fn state_file(project_root: &Path) -> PathBuf {
        Self::state_dir(project_root).join("state.yml")
    }

    /// Load state from disk, or start empty when no state exists yet.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::state_file(project_root);

        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        let state: Self =
            serde_yaml::from_str(&content).map_err(|e| OrdertrackError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(state)
    }

    /// Save state to disk using atomic write.
    ///
    /// Writes to a temp file and renames it over the state file, so the
    /// state file is never partially written.
    pub fn save(&self, project_root: &Path) -> Result<()> {
        let dir = Self::state_dir(project_root);
        fs::create_dir_all(&dir)?;

        let path = Self::state_file(project_root);
        let content =
            serde_yaml::to_string(self).map_err(|e| OrdertrackError::ConfigValidationError {
                message: format!("Failed to serialize state: {}", e),
            })?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    // --- Completion ---

    /// Ids of finished instances of `kind`.
    pub fn completed(&self, kind: PlanKind) -> &BTreeSet<u64> {
        match kind {
            PlanKind::Listing => &self.listings,
            PlanKind::Order => &self.orders,
        }
    }

    /// Whether instance `(kind, id)` has finished before.
    pub fn is_completed(&self, kind: PlanKind, id: u64) -> bool {
        self.completed(kind).contains(&id)
    }

    /// Mark `(kind, id)` finished. Returns false if it already was.
    pub fn record_completed(&mut self, kind: PlanKind, id: u64) -> bool {
        let set = match kind {
            PlanKind::Listing => &mut self.listings,
            PlanKind::Order => &mut self.orders,
        };
        set.insert(id)
    }

    // --- Payments ---

    /// Whether order `id` has been paid.
    pub fn is_paid(&self, id: u64) -> bool {
        self.paid_orders.contains(&id)
    }

    /// Mark order `id` paid. Returns false if it already was.
    pub fn record_payment(&mut self, id: u64) -> bool {
        self.paid_orders.insert(id)
    }

    // --- Run History ---

    /// Record a finished run.
    pub fn record_run(&mut self, record: RunRecord) {
        self.last_run = Some(record.timestamp);
        self.runs.insert(0, record);
    }

    /// Get the most recent run.
    pub fn last_run_record(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    /// Get run history (most recent first).
    pub fn run_history(&self, limit: usize) -> &[RunRecord] {
        let len = self.runs.len().min(limit);
        &self.runs[..len]
    }

    /// Prune old run history.
    pub fn prune_history(&mut self, keep: usize) {
        if self.runs.len() > keep {
            self.runs.truncate(keep);
        }
    }

    /// Get a summary for the status command.
    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary {
            last_run: self.last_run,
            listing_count: self.listings.len(),
            order_count: self.orders.len(),
            paid_count: self.paid_orders.len(),
            unpaid_orders: self
                .orders
                .iter()
                .filter(|id| !self.paid_orders.contains(id))
                .copied()
                .collect(),
        }
    }
}
