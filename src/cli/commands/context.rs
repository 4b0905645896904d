//! Project location and configuration shared by commands.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{load_config, validate, OrdertrackConfig};
use crate::error::Result;
use crate::records::Records;

/// Where a command operates: the project root and an optional explicit
/// config file.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    config_path: Option<PathBuf>,
}

impl ProjectContext {
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self { root, config_path }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and validate the project configuration.
    pub fn load_config(&self) -> Result<OrdertrackConfig> {
        let config = load_config(&self.root, self.config_path.as_deref())?;
        validate(&config)?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// The record source named by `config`, if any.
    pub fn records(&self, config: &OrdertrackConfig) -> Result<Option<Records>> {
        Records::from_config(&config.records, &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrdertrackError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn invalid_config_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".ordertrack")).unwrap();
        fs::write(temp.path().join(".ordertrack/config.yml"), "time_unit_ms: 0").unwrap();

        let ctx = ProjectContext::new(temp.path().to_path_buf(), None);
        let err = ctx.load_config().unwrap_err();
        assert!(matches!(err, OrdertrackError::ConfigValidationError { .. }));
    }

    #[test]
    fn no_records_without_source() {
        let temp = TempDir::new().unwrap();
        let ctx = ProjectContext::new(temp.path().to_path_buf(), None);
        let config = ctx.load_config().unwrap();
        assert!(ctx.records(&config).unwrap().is_none());
    }
}
