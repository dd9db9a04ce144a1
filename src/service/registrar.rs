//! Service registration.
//!
//! Writes the rendered unit into the supervisor's unit directory, then
//! reloads, enables and starts it. Each supervisor call is issued once and
//! not polled; the closing status query is informational.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{BotctlError, Result};
use crate::ui::UserInterface;

use super::supervisor::Supervisor;
use super::unit::{unit_file_name, UnitSpec};

/// Registers and removes units with a [`Supervisor`].
pub struct ServiceRegistrar<'a> {
    supervisor: &'a dyn Supervisor,
    unit_dir: PathBuf,
}

impl<'a> ServiceRegistrar<'a> {
    /// Register units in `unit_dir` (usually `/etc/systemd/system`).
    pub fn new(supervisor: &'a dyn Supervisor, unit_dir: impl Into<PathBuf>) -> Self {
        Self {
            supervisor,
            unit_dir: unit_dir.into(),
        }
    }

    /// Path of the unit file for `name`.
    pub fn unit_path(&self, name: &str) -> PathBuf {
        self.unit_dir.join(unit_file_name(name))
    }

    /// Render, write, reload, enable, start, then print status.
    ///
    /// Returns the path written. An existing unit file is replaced.
    pub fn register(&self, spec: &UnitSpec, ui: &mut dyn UserInterface) -> Result<PathBuf> {
        let contents = spec.render()?;
        let path = self.unit_path(&spec.name);

        write_unit(&path, &contents)?;
        tracing::info!("Wrote {}", path.display());
        ui.success(&format!("Wrote {}", path.display()));

        self.supervisor.daemon_reload()?;
        self.supervisor.enable(&spec.name)?;
        ui.success(&format!("Enabled {}", spec.file_name()));
        self.supervisor.start(&spec.name)?;
        ui.success(&format!("Started {}", spec.file_name()));

        match self.supervisor.status(&spec.name) {
            Ok(status) => ui.message(&status),
            Err(e) => ui.warning(&format!("Could not query status: {}", e)),
        }

        Ok(path)
    }

    /// Disable and stop the unit, remove its file and reload.
    ///
    /// Returns `false` when no unit file existed.
    pub fn unregister(&self, name: &str, ui: &mut dyn UserInterface) -> Result<bool> {
        let path = self.unit_path(name);
        if !path.exists() {
            ui.warning(&format!("{} is not installed", unit_file_name(name)));
            return Ok(false);
        }

        // A unit that is already stopped or disabled must not block removal.
        if let Err(e) = self.supervisor.disable(name) {
            tracing::warn!("disable {} failed: {}", name, e);
        }
        if let Err(e) = self.supervisor.stop(name) {
            tracing::warn!("stop {} failed: {}", name, e);
        }

        fs::remove_file(&path).map_err(|e| unit_write_error(&path, e))?;
        self.supervisor.daemon_reload()?;
        ui.success(&format!("Removed {}", path.display()));
        Ok(true)
    }
}

fn write_unit(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.is_dir() {
            return Err(BotctlError::file_missing(
                dir,
                "Set service.unit_dir to the supervisor's unit directory.",
            ));
        }
    }
    fs::write(path, contents).map_err(|e| unit_write_error(path, e))
}

fn unit_write_error(path: &Path, e: io::Error) -> BotctlError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        BotctlError::Other(anyhow::anyhow!(
            "Permission denied writing {}. Re-run with sudo.",
            path.display()
        ))
    } else {
        BotctlError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotctlConfig;
    use crate::project::Project;
    use crate::service::Systemd;
    use crate::shell::{Platform, ScriptedRunner};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn spec() -> UnitSpec {
        let project = Project::with_config("/srv/bot", BotctlConfig::default());
        UnitSpec::for_project(&project, &Platform::linux(), "deploy")
    }

    #[test]
    fn register_writes_unit_then_reloads_enables_starts_and_queries() {
        let unit_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        let systemd = Systemd::new(&runner);
        let registrar = ServiceRegistrar::new(&systemd, unit_dir.path());
        let mut ui = MockUI::new();

        let path = registrar.register(&spec(), &mut ui).unwrap();

        assert_eq!(path, unit_dir.path().join("telegram-bot.service"));
        let unit = fs::read_to_string(&path).unwrap();
        assert!(unit.contains("User=deploy"));
        assert!(unit.contains("Restart=always"));

        let reload = runner.position(&["systemctl", "daemon-reload"]).unwrap();
        let enable = runner.position(&["systemctl", "enable"]).unwrap();
        let start = runner.position(&["systemctl", "start"]).unwrap();
        let status = runner.position(&["systemctl", "status"]).unwrap();
        assert!(reload < enable && enable < start && start < status);
    }

    #[test]
    fn register_stops_when_enable_fails() {
        let unit_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        runner.respond(&["systemctl", "enable"], 1, "");
        let systemd = Systemd::new(&runner);
        let registrar = ServiceRegistrar::new(&systemd, unit_dir.path());

        let err = registrar.register(&spec(), &mut MockUI::new()).unwrap_err();

        assert!(matches!(err, BotctlError::CommandFailed { .. }));
        assert!(!runner.was_run(&["systemctl", "start"]));
    }

    #[test]
    fn register_into_missing_directory_is_file_missing() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        let systemd = Systemd::new(&runner);
        let registrar = ServiceRegistrar::new(&systemd, temp.path().join("nope"));

        let err = registrar.register(&spec(), &mut MockUI::new()).unwrap_err();

        assert!(matches!(err, BotctlError::FileMissing { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn unregister_removes_unit_and_reloads() {
        let unit_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        runner.respond(&["systemctl", "stop"], 5, "");
        let systemd = Systemd::new(&runner);
        let registrar = ServiceRegistrar::new(&systemd, unit_dir.path());
        let path = registrar.unit_path("telegram-bot");
        fs::write(&path, "[Unit]\n").unwrap();

        let removed = registrar
            .unregister("telegram-bot", &mut MockUI::new())
            .unwrap();

        assert!(removed);
        assert!(!path.exists());
        assert!(runner.was_run(&["systemctl", "disable", "telegram-bot.service"]));
        assert!(runner.was_run(&["systemctl", "daemon-reload"]));
    }

    #[test]
    fn unregister_without_unit_is_a_no_op() {
        let unit_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new();
        let systemd = Systemd::new(&runner);
        let registrar = ServiceRegistrar::new(&systemd, unit_dir.path());
        let mut ui = MockUI::new();

        assert!(!registrar.unregister("telegram-bot", &mut ui).unwrap());
        assert!(runner.calls().is_empty());
        assert!(ui.has_warning("not installed"));
    }
}
