//! Scripted command runner for tests.
//!
//! `ScriptedRunner` records every command it is asked to run and answers
//! with pre-registered results, so workflows can be exercised without
//! touching pip, systemd or the bot itself.
//!
//! # Example
//!
//! ```
//! use botctl::shell::{CommandLine, CommandOptions, CommandRunner, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.respond(&["python3", "--version"], 0, "Python 3.11.4\n");
//! runner.respond(&["python3", "-m", "pip", "install"], 1, "");
//!
//! let version = CommandLine::new("python3").arg("--version");
//! let out = runner.run(&version, &CommandOptions::default()).unwrap();
//! assert!(out.stdout.contains("3.11.4"));
//!
//! assert!(runner.was_run(&["python3", "--version"]));
//!
//! // One-shot replies are used up in order before the standing rules.
//! runner.respond_once(&["python3", "-m", "pip"], 1, "");
//! let pip = CommandLine::new("python3").args(["-m", "pip", "--version"]);
//! assert!(!runner.run(&pip, &CommandOptions::default()).unwrap().success);
//! assert!(runner.run(&pip, &CommandOptions::default()).unwrap().success);
//! ```

use std::cell::RefCell;

use crate::error::{BotctlError, Result};

use super::command::{CommandLine, CommandOptions, CommandResult, CommandRunner};

#[derive(Debug, Clone)]
enum Reply {
    Exit { code: i32, stdout: String },
    SpawnError,
}

/// Command runner that replays scripted results.
///
/// One-shot replies are consumed first, oldest first. Otherwise rules are
/// matched by command-line prefix, most recently registered first.
/// Commands with no matching rule succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    queued: RefCell<Vec<(Vec<String>, Reply)>>,
    rules: RefCell<Vec<(Vec<String>, Reply)>>,
    calls: RefCell<Vec<CommandLine>>,
}

impl ScriptedRunner {
    /// Create a runner where every command succeeds silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to commands starting with `prefix` with `code` and `stdout`.
    pub fn respond(&self, prefix: &[&str], code: i32, stdout: &str) {
        self.rules.borrow_mut().push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Reply::Exit {
                code,
                stdout: stdout.to_string(),
            },
        ));
    }

    /// Reply once to the next command starting with `prefix`.
    pub fn respond_once(&self, prefix: &[&str], code: i32, stdout: &str) {
        self.queued.borrow_mut().push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Reply::Exit {
                code,
                stdout: stdout.to_string(),
            },
        ));
    }

    /// Make commands starting with `prefix` fail to spawn, as if not installed.
    pub fn unavailable(&self, prefix: &[&str]) {
        self.rules.borrow_mut().push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Reply::SpawnError,
        ));
    }

    /// All commands run so far, in order.
    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded command starts with `prefix`.
    pub fn was_run(&self, prefix: &[&str]) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    /// Position of the first recorded command starting with `prefix`.
    pub fn position(&self, prefix: &[&str]) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c.starts_with(prefix))
    }

    /// Number of recorded commands starting with `prefix`.
    pub fn count(&self, prefix: &[&str]) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn take_queued(&self, command: &CommandLine) -> Option<Reply> {
        let mut queued = self.queued.borrow_mut();
        let index = queued
            .iter()
            .position(|(prefix, _)| matches_prefix(command, prefix))?;
        Some(queued.remove(index).1)
    }

    fn standing_reply(&self, command: &CommandLine) -> Option<Reply> {
        self.rules
            .borrow()
            .iter()
            .rev()
            .find(|(prefix, _)| matches_prefix(command, prefix))
            .map(|(_, reply)| reply.clone())
    }
}

fn matches_prefix(command: &CommandLine, prefix: &[String]) -> bool {
    let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
    command.starts_with(&prefix)
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandLine, _options: &CommandOptions) -> Result<CommandResult> {
        self.calls.borrow_mut().push(command.clone());

        let reply = self
            .take_queued(command)
            .or_else(|| self.standing_reply(command));

        match reply {
            Some(Reply::SpawnError) => Err(BotctlError::CommandFailed {
                command: command.to_string(),
                code: None,
            }),
            Some(Reply::Exit { code: 0, stdout }) => {
                Ok(CommandResult::success(stdout, String::new()))
            }
            Some(Reply::Exit { code, stdout }) => {
                Ok(CommandResult::failure(Some(code), stdout, String::new()))
            }
            None => Ok(CommandResult::success(String::new(), String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_commands_succeed() {
        let runner = ScriptedRunner::new();
        let out = runner
            .run(&CommandLine::new("anything"), &CommandOptions::default())
            .unwrap();
        assert!(out.success);
    }

    #[test]
    fn later_rules_win() {
        let runner = ScriptedRunner::new();
        runner.respond(&["pip"], 0, "");
        runner.respond(&["pip", "install"], 2, "");

        let out = runner
            .run(
                &CommandLine::new("pip").arg("install"),
                &CommandOptions::default(),
            )
            .unwrap();

        assert_eq!(out.exit_code, Some(2));
    }

    #[test]
    fn queued_replies_are_used_once_in_order() {
        let runner = ScriptedRunner::new();
        let opts = CommandOptions::default();
        let pip = CommandLine::new("python3").args(["-m", "pip", "--version"]);
        runner.respond(&["python3", "-m", "pip"], 0, "pip 24.0");
        runner.respond_once(&["python3", "-m", "pip"], 1, "");
        runner.respond_once(&["python3", "-m", "pip"], 2, "");

        assert_eq!(runner.run(&pip, &opts).unwrap().exit_code, Some(1));
        assert_eq!(runner.run(&pip, &opts).unwrap().exit_code, Some(2));
        let third = runner.run(&pip, &opts).unwrap();
        assert!(third.success);
        assert_eq!(third.stdout, "pip 24.0");
        assert_eq!(runner.count(&["python3", "-m", "pip"]), 3);
    }

    #[test]
    fn unavailable_reports_spawn_failure() {
        let runner = ScriptedRunner::new();
        runner.unavailable(&["tar"]);

        let err = runner
            .run(&CommandLine::new("tar"), &CommandOptions::default())
            .unwrap_err();

        assert!(matches!(err, BotctlError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn records_call_order() {
        let runner = ScriptedRunner::new();
        let opts = CommandOptions::default();
        runner.run(&CommandLine::new("first"), &opts).unwrap();
        runner.run(&CommandLine::new("second"), &opts).unwrap();

        assert_eq!(runner.position(&["first"]), Some(0));
        assert_eq!(runner.position(&["second"]), Some(1));
        assert_eq!(runner.calls().len(), 2);
    }
}
