//! Configuration schema definitions for botctl.
//!
//! This module contains the struct definitions that map to the optional
//! `.botctl/config.yml` file. Every field has a default, so a project with
//! no configuration file at all gets the conventional layout:
//! `.env`, `env_example.txt`, `requirements.txt`, `main.py`, `venv/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.botctl/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotctlConfig {
    /// Application name (for display purposes)
    pub app_name: String,

    /// Paths inside the working directory
    pub paths: PathsConfig,

    /// Interpreter requirements
    pub python: PythonConfig,

    /// Supervisor unit settings
    pub service: ServiceConfig,

    /// Archive settings
    pub archive: ArchiveConfig,

    /// Status report settings
    pub status: StatusConfig,
}

impl Default for BotctlConfig {
    fn default() -> Self {
        Self {
            app_name: "Support Bot".to_string(),
            paths: PathsConfig::default(),
            python: PythonConfig::default(),
            service: ServiceConfig::default(),
            archive: ArchiveConfig::default(),
            status: StatusConfig::default(),
        }
    }
}

/// File locations, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Configuration file handed to the bot
    pub env_file: PathBuf,

    /// Template the configuration file is copied from
    pub env_template: PathBuf,

    /// Dependency manifest passed to pip
    pub manifest: PathBuf,

    /// Script started by the interpreter
    pub entry_point: PathBuf,

    /// Isolated environment used by the supervised service
    pub venv: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(".env"),
            env_template: PathBuf::from("env_example.txt"),
            manifest: PathBuf::from("requirements.txt"),
            entry_point: PathBuf::from("main.py"),
            venv: PathBuf::from("venv"),
        }
    }
}

/// Interpreter requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Oldest accepted interpreter version
    pub min_version: String,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            min_version: "3.8".to_string(),
        }
    }
}

/// Supervisor unit settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Unit name, without the `.service` suffix
    pub name: String,

    /// Human-readable description written into the unit
    pub description: String,

    /// Account the service runs as (defaults to the invoking user)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Directory the unit file is written to
    pub unit_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "telegram-bot".to_string(),
            description: "Telegram Support Bot".to_string(),
            user: None,
            unit_dir: PathBuf::from("/etc/systemd/system"),
        }
    }
}

/// Which compressor builds archives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressorKind {
    /// In-process gzip-compressed tar writer
    #[default]
    Builtin,
    /// The host's `tar` binary
    System,
}

/// Archive settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// File name prefix; the timestamp follows an underscore
    pub prefix: String,

    /// Compressor adapter
    pub compressor: CompressorKind,

    /// Glob patterns matched against every path component
    pub exclude: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            prefix: "bot_backup".to_string(),
            compressor: CompressorKind::Builtin,
            exclude: default_exclusions(),
        }
    }
}

/// Compiled artifacts, caches, logs, sessions and local environments.
pub fn default_exclusions() -> Vec<String> {
    [
        "__pycache__",
        "*.pyc",
        "*.pyo",
        ".pytest_cache",
        "*.log",
        "*.session",
        "*.session-journal",
        "venv",
        ".git",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Status report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Journal lines to show
    pub journal_lines: usize,

    /// Directory entries to list
    pub listing_limit: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            journal_lines: 10,
            listing_limit: 20,
        }
    }
}
