//! External command execution.

use crate::error::{BotctlError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A program plus its arguments, kept apart so paths with spaces survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program name or path.
    pub program: String,
    /// Arguments, passed verbatim.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Start a command line for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether the program and leading arguments equal `prefix`.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        let mut parts =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        prefix.iter().all(|p| parts.next() == Some(*p))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("\"{}\"", part)
    } else {
        part.to_string()
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            success: false,
        }
    }

    /// Stdout and stderr joined, for error blocks.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }

    /// Turn a non-zero exit into [`BotctlError::CommandFailed`].
    pub fn into_checked(self, command: &CommandLine) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(BotctlError::CommandFailed {
                command: command.to_string(),
                code: self.exit_code,
            })
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both streams, optionally in `cwd`.
    pub fn captured(cwd: Option<&Path>) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            capture_stdout: true,
            capture_stderr: true,
        }
    }

    /// Inherit the caller's terminal, optionally in `cwd`.
    pub fn inherited(cwd: Option<&Path>) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            ..Default::default()
        }
    }
}

/// Runs external commands.
///
/// Workflows receive a runner instead of spawning processes themselves so
/// tests can script the outcome of every command.
pub trait CommandRunner {
    /// Run `command` to completion.
    fn run(&self, command: &CommandLine, options: &CommandOptions) -> Result<CommandResult>;
}

/// [`CommandRunner`] backed by real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine, options: &CommandOptions) -> Result<CommandResult> {
        execute(command, options)
    }
}

/// Execute a command.
///
/// A command that cannot be spawned at all is reported as
/// [`BotctlError::CommandFailed`] with no exit code.
pub fn execute(command: &CommandLine, options: &CommandOptions) -> Result<CommandResult> {
    tracing::debug!("Executing: {}", command);

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::inherit());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", command.program, e);
        BotctlError::CommandFailed {
            command: command.to_string(),
            code: None,
        }
    })?;

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr))
    } else {
        Ok(CommandResult::failure(output.status.code(), stdout, stderr))
    }
}

/// Execute a command and return success/failure.
pub fn execute_check(
    runner: &dyn CommandRunner,
    command: &CommandLine,
    cwd: Option<&Path>,
) -> bool {
    runner
        .run(command, &CommandOptions::captured(cwd))
        .map(|r| r.success)
        .unwrap_or(false)
}

/// Execute a command and collect output without echoing it.
pub fn execute_quiet(
    runner: &dyn CommandRunner,
    command: &CommandLine,
    cwd: Option<&Path>,
) -> Result<CommandResult> {
    runner.run(command, &CommandOptions::captured(cwd))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandLine {
        if cfg!(target_os = "windows") {
            CommandLine::new("cmd").args(["/C", script])
        } else {
            CommandLine::new("sh").args(["-c", script])
        }
    }

    #[test]
    fn execute_successful_command() {
        let result = execute(&sh("echo hello"), &CommandOptions::captured(None)).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute(&sh("exit 3"), &CommandOptions::captured(None)).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_unknown_program_is_command_failed() {
        let cmd = CommandLine::new("definitely-not-a-real-program-botctl");
        let err = execute(&cmd, &CommandOptions::captured(None)).unwrap_err();

        assert!(matches!(err, BotctlError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();
        let cmd = if cfg!(target_os = "windows") {
            sh("dir /b")
        } else {
            sh("ls")
        };

        let result = execute(&cmd, &CommandOptions::captured(Some(temp.path()))).unwrap();

        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn execute_check_returns_bool() {
        assert!(execute_check(&SystemRunner, &sh("exit 0"), None));
        assert!(!execute_check(&SystemRunner, &sh("exit 1"), None));
    }

    #[test]
    fn into_checked_maps_failure() {
        let cmd = CommandLine::new("pip").arg("install");
        let result = CommandResult::failure(Some(2), String::new(), String::new());

        let err = result.into_checked(&cmd).unwrap_err();

        assert!(err.to_string().contains("pip install"));
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = CommandLine::new("/opt/my bot/venv/bin/python").arg("main.py");
        assert_eq!(cmd.to_string(), "\"/opt/my bot/venv/bin/python\" main.py");
    }

    #[test]
    fn starts_with_matches_program_and_args() {
        let cmd = CommandLine::new("systemctl").args(["is-active", "bot"]);
        assert!(cmd.starts_with(&["systemctl", "is-active"]));
        assert!(!cmd.starts_with(&["systemctl", "status"]));
        assert!(!cmd.starts_with(&["systemctl", "is-active", "bot", "extra"]));
    }

    #[test]
    fn combined_output_joins_streams() {
        let result = CommandResult::failure(Some(1), "out".to_string(), "err".to_string());
        assert_eq!(result.combined_output(), "out\nerr");
    }
}
