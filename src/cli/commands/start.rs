//! Start and quick-start commands.
//!
//! `botctl start` runs the bot in the foreground and exits 1 if the bot
//! exits non-zero. `botctl start --supervised` asks systemd to start the registered
//! unit instead. `botctl quick-start` is install followed by start, and
//! stops early when `.env` was only just created.

use crate::cli::args::StartArgs;
use crate::deploy::{Deployment, LaunchMode};
use crate::error::Result;
use crate::requirements::EnvironmentProber;
use crate::service::Systemd;
use crate::shell::{Platform, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectLocation};

/// The start command implementation.
pub struct StartCommand {
    location: ProjectLocation,
    args: StartArgs,
}

impl StartCommand {
    /// Create a new start command.
    pub fn new(location: ProjectLocation, args: StartArgs) -> Self {
        Self { location, args }
    }

    /// How the bot will be launched.
    pub fn mode(&self) -> LaunchMode {
        if self.args.supervised {
            LaunchMode::Supervised
        } else {
            LaunchMode::Direct
        }
    }
}

impl Command for StartCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.location.open()?;
        let runner = SystemRunner;
        let platform = Platform::detect();
        let prober = EnvironmentProber::new(&runner, platform);
        let deployment = Deployment::new(&project, &runner, prober, platform);

        match self.mode() {
            LaunchMode::Direct => {
                ui.show_header(&format!("{} - Start", project.config().app_name));
                let code = deployment.start_direct(ui)?;
                Ok(CommandResult::from_exit_code(code))
            }
            LaunchMode::Supervised => {
                let systemd = Systemd::new(&runner);
                deployment.start_supervised(&systemd, ui)?;
                Ok(CommandResult::success())
            }
        }
    }
}

/// The quick-start command implementation.
pub struct QuickStartCommand {
    location: ProjectLocation,
}

impl QuickStartCommand {
    /// Create a new quick-start command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for QuickStartCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.location.open()?;
        ui.show_header(&format!("{} - Quick start", project.config().app_name));

        let runner = SystemRunner;
        let platform = Platform::detect();
        let prober = EnvironmentProber::new(&runner, platform);
        let code = Deployment::new(&project, &runner, prober, platform).quick_start(ui)?;
        Ok(CommandResult::from_exit_code(code))
    }
}
