//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::BotctlConfig;
use crate::error::Result;
use crate::project::Project;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Collapse a child process exit code to 0 or 1.
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            tracing::warn!("Exit code {} reported as 1", exit_code);
            Self::failure(1)
        }
    }
}

/// The bot's working directory plus an optional config override.
#[derive(Debug, Clone)]
pub struct ProjectLocation {
    root: PathBuf,
    config: Option<PathBuf>,
}

impl ProjectLocation {
    pub fn new(root: impl Into<PathBuf>, config: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the project and its configuration.
    pub fn open(&self) -> Result<Project> {
        Project::open(&self.root, self.config.as_deref())
    }

    /// Like [`open`](Self::open), but a missing directory yields a project
    /// with default configuration so read-only commands can still report.
    pub fn open_or_default(&self) -> Result<Project> {
        if self.root.is_dir() {
            return self.open();
        }
        tracing::warn!(
            "{} does not exist; using default configuration",
            self.root.display()
        );
        Ok(Project::with_config(self.root.clone(), BotctlConfig::default()))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    location: ProjectLocation,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            location: ProjectLocation::new(project_root, config),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        self.location.root()
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let location = self.location.clone();
        match &cli.command {
            Commands::Install => super::install::InstallCommand::new(location).execute(ui),
            Commands::QuickStart => super::start::QuickStartCommand::new(location).execute(ui),
            Commands::Start(args) => {
                super::start::StartCommand::new(location, args.clone()).execute(ui)
            }
            Commands::Deploy => super::deploy::DeployCommand::new(location).execute(ui),
            Commands::Stop => super::lifecycle::StopCommand::new(location).execute(ui),
            Commands::Restart => super::lifecycle::RestartCommand::new(location).execute(ui),
            Commands::Uninstall(args) => {
                super::lifecycle::UninstallCommand::new(location, args.clone()).execute(ui)
            }
            Commands::Status => super::status::StatusCommand::new(location).execute(ui),
            Commands::Archive => super::archive::ArchiveCommand::new(location).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn child_exit_code_collapses_to_failure() {
        assert!(CommandResult::from_exit_code(0).success);
        assert_eq!(CommandResult::from_exit_code(3).exit_code, 1);
        assert_eq!(CommandResult::from_exit_code(42).exit_code, 1);
        assert!(!CommandResult::from_exit_code(-1).success);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"), None);
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn opening_missing_directory_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let location = ProjectLocation::new(temp.path().join("missing"), None);

        assert!(location.open().is_err());
    }

    #[test]
    fn missing_directory_falls_back_to_defaults_for_reports() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let location = ProjectLocation::new(&missing, None);

        let project = location.open_or_default().unwrap();

        assert_eq!(project.root(), missing.as_path());
        assert_eq!(project.config(), &BotctlConfig::default());
    }
}
