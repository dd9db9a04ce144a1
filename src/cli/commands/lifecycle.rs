//! Service lifecycle commands.
//!
//! `botctl stop`, `botctl restart` and `botctl uninstall` act on the unit
//! registered by `botctl deploy`.

use crate::cli::args::UninstallArgs;
use crate::error::Result;
use crate::project::Project;
use crate::requirements::EnvironmentProber;
use crate::service::{require_supervisor, ServiceRegistrar, Supervisor, Systemd};
use crate::shell::{Platform, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectLocation};

/// Open the project, check for systemd, then run `action` against it.
fn with_supervisor<T>(
    location: &ProjectLocation,
    action: impl FnOnce(&Project, &dyn Supervisor) -> Result<T>,
) -> Result<T> {
    let project = location.open()?;
    let runner = SystemRunner;
    let platform = Platform::detect();
    require_supervisor(&platform, &EnvironmentProber::new(&runner, platform))?;
    action(&project, &Systemd::new(&runner))
}

/// The stop command implementation.
pub struct StopCommand {
    location: ProjectLocation,
}

impl StopCommand {
    /// Create a new stop command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for StopCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        with_supervisor(&self.location, |project, supervisor| {
            let name = &project.config().service.name;
            supervisor.stop(name)?;
            ui.success(&format!("Stopped {}", name));
            Ok(CommandResult::success())
        })
    }
}

/// The restart command implementation.
pub struct RestartCommand {
    location: ProjectLocation,
}

impl RestartCommand {
    /// Create a new restart command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for RestartCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        with_supervisor(&self.location, |project, supervisor| {
            let name = &project.config().service.name;
            supervisor.restart(name)?;
            ui.success(&format!("Restarted {}", name));
            Ok(CommandResult::success())
        })
    }
}

/// The uninstall command implementation.
pub struct UninstallCommand {
    location: ProjectLocation,
    args: UninstallArgs,
}

impl UninstallCommand {
    /// Create a new uninstall command.
    pub fn new(location: ProjectLocation, args: UninstallArgs) -> Self {
        Self { location, args }
    }
}

impl Command for UninstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        with_supervisor(&self.location, |project, supervisor| {
            let service = &project.config().service;
            if !self.args.yes {
                let question = format!("Stop and remove the {} service?", service.name);
                if !ui.confirm(&question, false)? {
                    ui.message("Cancelled");
                    return Ok(CommandResult::success());
                }
            }

            ServiceRegistrar::new(supervisor, &service.unit_dir).unregister(&service.name, ui)?;
            Ok(CommandResult::success())
        })
    }
}
