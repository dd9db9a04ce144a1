//! Install command implementation.
//!
//! The `botctl install` command checks Python and pip, creates `.env`
//! from its template when missing, and installs the bot's dependencies.

use crate::deploy::Deployment;
use crate::error::Result;
use crate::requirements::EnvironmentProber;
use crate::shell::{Platform, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectLocation};

/// The install command implementation.
pub struct InstallCommand {
    location: ProjectLocation,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.location.open()?;
        ui.show_header(&format!("{} - Install", project.config().app_name));

        let runner = SystemRunner;
        let platform = Platform::detect();
        let prober = EnvironmentProber::new(&runner, platform);
        Deployment::new(&project, &runner, prober, platform).install(ui)?;

        ui.success("Install complete");
        ui.show_hint("Start the bot with `botctl start`");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn missing_project_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cmd = InstallCommand::new(ProjectLocation::new(temp.path().join("gone"), None));

        assert!(cmd.execute(&mut MockUI::new()).is_err());
    }
}
