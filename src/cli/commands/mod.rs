//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command opens the project
//! through a shared [`ProjectLocation`], so `--project` and `--config`
//! apply uniformly.

pub mod archive;
pub mod completions;
pub mod deploy;
pub mod dispatcher;
pub mod install;
pub mod lifecycle;
pub mod start;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ProjectLocation};
