//! Deploy command implementation.
//!
//! The `botctl deploy` command prepares a virtualenv, installs the
//! dependencies into it and registers the bot as a systemd unit.

use crate::deploy::{DeployOutcome, Deployment};
use crate::error::Result;
use crate::requirements::EnvironmentProber;
use crate::service::Systemd;
use crate::shell::{invoking_user, is_elevated, Platform, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectLocation};

/// The deploy command implementation.
pub struct DeployCommand {
    location: ProjectLocation,
}

impl DeployCommand {
    /// Create a new deploy command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for DeployCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.location.open()?;
        let config = project.config();
        ui.show_header(&format!("{} - Deploy", config.app_name));

        if !is_elevated() {
            ui.warning(&format!(
                "Writing to {} usually needs root; re-run with sudo if it fails",
                config.service.unit_dir.display()
            ));
        }

        let user = config
            .service
            .user
            .clone()
            .unwrap_or_else(|| invoking_user(|key| std::env::var(key)));
        tracing::debug!("Service will run as {}", user);

        let runner = SystemRunner;
        let platform = Platform::detect();
        let prober = EnvironmentProber::new(&runner, platform);
        let systemd = Systemd::new(&runner);
        let outcome =
            Deployment::new(&project, &runner, prober, platform).deploy(&systemd, &user, ui)?;
        if outcome == DeployOutcome::AwaitingConfiguration {
            return Ok(CommandResult::failure(1));
        }

        ui.success(&format!("{} is running under systemd", config.service.name));
        ui.show_hint(&format!(
            "Check it with `botctl status` or `journalctl -u {} -f`",
            config.service.name
        ));
        Ok(CommandResult::success())
    }
}
