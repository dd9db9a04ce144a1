//! Configuration loading, parsing, and validation for botctl.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//! - `.env` inspection in [`env_file`]
//!
//! # Example
//!
//! ```
//! use botctl::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".botctl");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "service:\n  name: support-bot\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.service.name, "support-bot");
//! assert_eq!(config.archive.prefix, "bot_backup");
//! ```

pub mod env_file;
pub mod interpolation;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use schema::{
    default_exclusions, ArchiveConfig, BotctlConfig, CompressorKind, PathsConfig, PythonConfig,
    ServiceConfig, StatusConfig,
};

pub use loader::{load_config, load_config_value, load_merged_config, ConfigPaths, CONFIG_DIR};

pub use merger::{deep_merge, merge_configs};

pub use validator::{validate, validate_config, ValidationError};

pub use interpolation::{parse_interpolation, resolve_string, Segment, TemplateVars};

pub use env_file::{is_placeholder, placeholder_keys, EnvFileParser};
