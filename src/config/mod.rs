//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use ordertrack::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".ordertrack");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "time_unit_ms: 20").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.time_unit_ms, 20);
//! ```
//!
//! # Configuration File Location
//!
//! The project config lives at `.ordertrack/config.yml`. A path given with
//! `--config` replaces it. Without either, defaults apply.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_project_root, load_config, load_config_file, parse_config, ConfigPaths};
pub use schema::{OrdertrackConfig, OutputMode, RecordsConfig};
pub use validator::{validate, validate_config, ValidationError};
