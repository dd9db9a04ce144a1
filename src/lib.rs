//! botctl - Deployment and lifecycle automation for a supervised Python bot.
//!
//! botctl replaces a pile of near-duplicate install, start and backup
//! scripts with one configuration-driven workflow and a handful of platform
//! adapters resolved at run time.
//!
//! # Modules
//!
//! - [`archive`] - Timestamped backups of the working directory
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, validation and `.env` parsing
//! - [`deploy`] - Bootstrap, dependency install, virtualenv, launch and workflows
//! - [`error`] - Error types and result aliases
//! - [`project`] - The bot's working directory and resolved paths
//! - [`requirements`] - Interpreter and package manager probing
//! - [`service`] - systemd unit rendering and registration
//! - [`shell`] - External command execution and platform adapters
//! - [`status`] - Read-only status report
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use botctl::config::{resolve_string, TemplateVars};
//!
//! let mut vars = TemplateVars::new();
//! vars.insert("user", "deploy");
//! let line = resolve_string("User=${user}", &vars).unwrap();
//! assert_eq!(line, "User=deploy");
//! ```
//!
//! For file-based config loading, see the integration tests.

pub mod archive;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod project;
pub mod requirements;
pub mod service;
pub mod shell;
pub mod status;
pub mod ui;

pub use error::{BotctlError, Result};
