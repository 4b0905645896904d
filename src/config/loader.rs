//! Configuration file discovery and loading.

use crate::config::schema::OrdertrackConfig;
use crate::error::{OrdertrackError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where configuration and state live for a project.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// `.ordertrack/` directory.
    pub dir: PathBuf,

    /// Project config: `.ordertrack/config.yml`, if present.
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(".ordertrack");
        let path = dir.join("config.yml");
        Self {
            project: path.exists().then_some(path),
            dir,
        }
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.ordertrack` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(".ordertrack").is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<OrdertrackConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OrdertrackError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            OrdertrackError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// An empty file yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<OrdertrackConfig> {
    if content.trim().is_empty() {
        return Ok(OrdertrackConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| OrdertrackError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for a project.
///
/// An explicit path must exist. Otherwise the project config is used when
/// present, and defaults when not.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<OrdertrackConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    match ConfigPaths::discover(project_root).project {
        Some(path) => load_config_file(&path),
        None => Ok(OrdertrackConfig::default()),
    }
}
