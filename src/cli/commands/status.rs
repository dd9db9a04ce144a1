//! Status command implementation.
//!
//! The `botctl status` command prints a read-only report. Sections that
//! cannot be collected are shown as warnings; the command still exits 0.

use crate::error::Result;
use crate::requirements::EnvironmentProber;
use crate::service::{require_supervisor, Systemd};
use crate::shell::{Platform, SystemRunner};
use crate::status::StatusReporter;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectLocation};

/// The status command implementation.
pub struct StatusCommand {
    location: ProjectLocation,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(location: ProjectLocation) -> Self {
        Self { location }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = self.location.open_or_default()?;
        ui.show_header(&format!("{} - Status", project.config().app_name));

        let runner = SystemRunner;
        let platform = Platform::detect();
        let systemd = Systemd::new(&runner);
        let has_supervisor =
            require_supervisor(&platform, &EnvironmentProber::new(&runner, platform)).is_ok();

        let mut reporter = StatusReporter::new(
            &project,
            &runner,
            EnvironmentProber::new(&runner, platform),
            platform,
        );
        if has_supervisor {
            reporter = reporter.with_supervisor(&systemd);
        }

        let mut spinner = ui.start_spinner("Collecting status...");
        let report = reporter.collect();
        spinner.finish_success("Collected status");
        report.render(ui);
        Ok(CommandResult::success())
    }
}
