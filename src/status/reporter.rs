//! Status report assembly.
//!
//! Each section is collected independently. A failing section carries its
//! error text instead of lines and never stops the sections after it.

use crate::config::{placeholder_keys, EnvFileParser};
use crate::error::BotctlError;
use crate::project::Project;
use crate::requirements::{EnvironmentProber, RequirementStatus};
use crate::service::{unit_file_name, Supervisor};
use crate::shell::{CommandRunner, Platform};
use crate::ui::UserInterface;

use super::host::HostSummary;
use super::network::bot_connections;
use super::workdir::WorkdirSummary;

/// One titled block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: std::result::Result<Vec<String>, String>,
}

impl Section {
    fn ok(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            body: Ok(lines),
        }
    }

    fn failed(title: &str, error: impl ToString) -> Self {
        let error = error.to_string();
        tracing::warn!("status section {} failed: {}", title, error);
        Self {
            title: title.to_string(),
            body: Err(error),
        }
    }
}

/// The collected report.
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub sections: Vec<Section>,
}

impl StatusReport {
    /// Look up a section by title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Print every section; failures are shown as warnings.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        for section in &self.sections {
            ui.show_section(&section.title);
            match &section.body {
                Ok(lines) if lines.is_empty() => ui.message("(none)"),
                Ok(lines) => lines.iter().for_each(|l| ui.message(l)),
                Err(e) => ui.warning(e),
            }
        }
    }
}

/// Collects the status sections for a project.
pub struct StatusReporter<'a> {
    project: &'a Project,
    runner: &'a dyn CommandRunner,
    prober: EnvironmentProber<'a>,
    platform: Platform,
    supervisor: Option<&'a dyn Supervisor>,
    sample_host: bool,
}

impl<'a> StatusReporter<'a> {
    /// Reporter without a supervisor; service sections report as unavailable.
    pub fn new(
        project: &'a Project,
        runner: &'a dyn CommandRunner,
        prober: EnvironmentProber<'a>,
        platform: Platform,
    ) -> Self {
        Self {
            project,
            runner,
            prober,
            platform,
            supervisor: None,
            sample_host: true,
        }
    }

    /// Query `supervisor` for the service sections.
    pub fn with_supervisor(mut self, supervisor: &'a dyn Supervisor) -> Self {
        self.supervisor = Some(supervisor);
        self
    }

    /// Skip host sampling, which blocks briefly for CPU usage.
    pub fn without_host_sample(mut self) -> Self {
        self.sample_host = false;
        self
    }

    /// Collect every section in report order.
    pub fn collect(&self) -> StatusReport {
        let mut sections = vec![self.service(), self.journal()];
        if self.sample_host {
            sections.push(Section::ok("Host", HostSummary::collect().lines()));
        }
        sections.push(self.network());
        sections.push(self.working_directory());
        sections.push(self.configuration());
        sections.push(self.requirements());
        StatusReport { sections }
    }

    fn service_name(&self) -> &str {
        &self.project.config().service.name
    }

    fn no_supervisor(&self) -> String {
        format!(
            "No service supervisor on this host; {} cannot be queried",
            unit_file_name(self.service_name())
        )
    }

    fn service(&self) -> Section {
        const TITLE: &str = "Service";
        let Some(supervisor) = self.supervisor else {
            return Section::failed(TITLE, self.no_supervisor());
        };
        match supervisor.active_state(self.service_name()) {
            Ok(state) => Section::ok(
                TITLE,
                vec![format!("{}: {}", unit_file_name(self.service_name()), state)],
            ),
            Err(e) => Section::failed(TITLE, e),
        }
    }

    fn journal(&self) -> Section {
        const TITLE: &str = "Recent logs";
        let Some(supervisor) = self.supervisor else {
            return Section::failed(TITLE, self.no_supervisor());
        };
        let lines = self.project.config().status.journal_lines;
        match supervisor.journal_tail(self.service_name(), lines) {
            Ok(text) => Section::ok(TITLE, text.lines().map(str::to_string).collect()),
            Err(e) => Section::failed(TITLE, e),
        }
    }

    fn network(&self) -> Section {
        const TITLE: &str = "Network";
        match bot_connections(self.runner, self.platform.interpreter_candidates()) {
            Ok(conns) => Section::ok(TITLE, conns.iter().map(|c| c.line()).collect()),
            Err(e) => Section::failed(TITLE, e),
        }
    }

    fn working_directory(&self) -> Section {
        const TITLE: &str = "Working directory";
        let root = self.project.root();
        match WorkdirSummary::collect(root, self.project.config().status.listing_limit) {
            Ok(summary) => Section::ok(TITLE, summary.lines(root)),
            Err(e) => Section::failed(TITLE, e),
        }
    }

    fn configuration(&self) -> Section {
        const TITLE: &str = "Configuration";
        let path = self.project.env_file();
        let vars = match EnvFileParser::load(&path) {
            Ok(vars) => vars,
            Err(BotctlError::FileMissing { .. }) => {
                return Section::failed(
                    TITLE,
                    format!("{} is missing; run `botctl install`", path.display()),
                )
            }
            Err(e) => return Section::failed(TITLE, e),
        };

        let mut lines = vec![format!("{}: {} keys", path.display(), vars.len())];
        let placeholders = placeholder_keys(&vars);
        if placeholders.is_empty() {
            lines.push("No placeholder values".to_string());
        } else {
            lines.push(format!("Still to fill in: {}", placeholders.join(", ")));
        }
        Section::ok(TITLE, lines)
    }

    fn requirements(&self) -> Section {
        let report = self.prober.report(&self.project.env_file());
        let lines = report
            .checks
            .iter()
            .map(|check| match &check.status {
                RequirementStatus::Satisfied {
                    path,
                    version: Some(v),
                } => format!("{}: {} ({})", check.requirement, v, path.display()),
                RequirementStatus::Satisfied { path, .. } => {
                    format!("{}: {}", check.requirement, path.display())
                }
                RequirementStatus::Missing { hint } => {
                    format!("{}: missing. {}", check.requirement, hint)
                }
            })
            .collect();
        Section::ok("Requirements", lines)
    }
}
