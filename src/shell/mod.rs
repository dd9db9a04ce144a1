//! External command execution and platform adapters.

pub mod command;
pub mod platform;
pub mod scripted;

pub use command::{
    execute, execute_check, execute_quiet, CommandLine, CommandOptions, CommandResult,
    CommandRunner, SystemRunner,
};
pub use platform::{invoking_user, is_ci, is_ci_with, is_elevated, OsFamily, Platform};
pub use scripted::ScriptedRunner;
