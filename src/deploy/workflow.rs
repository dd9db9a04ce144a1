//! Deployment workflows.
//!
//! Every command is the same short pipeline with different stages switched
//! on: probe, bootstrap, install, optionally register, then launch.
//! Stages run in order and the first failure stops the pipeline.

use crate::config::{placeholder_keys, EnvFileParser};
use crate::error::Result;
use crate::project::Project;
use crate::requirements::{EnvironmentProber, Interpreter, PackageManagerState, PythonVersion};
use crate::service::{require_supervisor, ServiceRegistrar, Supervisor, UnitSpec};
use crate::shell::{CommandRunner, Platform};
use crate::ui::UserInterface;

use super::bootstrap::{bootstrap_config, BootstrapOutcome};
use super::installer::install_dependencies;
use super::launcher::{launch_direct, launch_supervised};
use super::venv::ensure_venv;

/// How a deployment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The unit was written and started.
    Registered,
    /// `.env` was just created from the template; nothing was registered.
    AwaitingConfiguration,
}

/// Collaborators shared by every workflow.
pub struct Deployment<'a> {
    project: &'a Project,
    runner: &'a dyn CommandRunner,
    prober: EnvironmentProber<'a>,
    platform: Platform,
}

impl<'a> Deployment<'a> {
    /// Bundle the collaborators for `project`.
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
        }
    }

    /// Interpreter plus a usable pip, or the first blocking failure.
    fn probe(&self, ui: &mut dyn UserInterface) -> Result<Interpreter> {
        let minimum: PythonVersion = self.project.config().python.min_version.parse()?;
        let interpreter = self.prober.require_interpreter(minimum)?;
        ui.success(&format!(
            "Python {} ({})",
            interpreter.version,
            interpreter.path.display()
        ));

        if self.prober.ensure_package_manager(&interpreter)? == PackageManagerState::Remediated {
            ui.success("Installed pip with ensurepip");
        }
        Ok(interpreter)
    }

    fn bootstrap(&self, ui: &mut dyn UserInterface) -> Result<BootstrapOutcome> {
        bootstrap_config(&self.project.env_template(), &self.project.env_file(), ui)
    }

    /// Probe, bootstrap the configuration file, install dependencies.
    ///
    /// Safe to re-run.
    pub fn install(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let interpreter = self.probe(ui)?;
        self.bootstrap(ui)?;
        install_dependencies(
            self.runner,
            &interpreter.path,
            &self.project.manifest(),
            self.project.root(),
            ui,
        )?;
        tracing::info!("Install finished");
        Ok(())
    }

    /// First-run helper: probe, bootstrap, then launch in the foreground.
    ///
    /// Returns 1 without launching when the configuration file was just
    /// created, so the operator can fill it in first. Otherwise returns
    /// the bot's exit code.
    pub fn quick_start(&self, ui: &mut dyn UserInterface) -> Result<i32> {
        self.probe(ui)?;
        if self.bootstrap(ui)? == BootstrapOutcome::Created {
            ui.warning("Fill in the configuration file, then run `botctl quick-start` again");
            return Ok(1);
        }
        launch_direct(self.project, self.runner, &self.prober, ui)
    }

    /// Direct launch. Dependencies are installed on every run.
    pub fn start_direct(&self, ui: &mut dyn UserInterface) -> Result<i32> {
        launch_direct(self.project, self.runner, &self.prober, ui)
    }

    /// Start the registered unit.
    pub fn start_supervised(
        &self,
        supervisor: &dyn Supervisor,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        require_supervisor(&self.platform, &self.prober)?;
        launch_supervised(self.project, supervisor, ui)
    }

    /// Server deployment: probe, bootstrap, virtualenv, install once,
    /// register and start the unit running as `user`.
    ///
    /// Stops before the virtualenv when the configuration file was just
    /// created, so the unit never starts with template values.
    pub fn deploy(
        &self,
        supervisor: &dyn Supervisor,
        user: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<DeployOutcome> {
        require_supervisor(&self.platform, &self.prober)?;
        let interpreter = self.probe(ui)?;
        if self.bootstrap(ui)? == BootstrapOutcome::Created {
            ui.warning("Fill in the configuration file, then run `botctl deploy` again");
            return Ok(DeployOutcome::AwaitingConfiguration);
        }
        self.warn_placeholders(ui);

        let (venv_python, _) = ensure_venv(
            self.runner,
            &interpreter,
            &self.platform,
            &self.project.venv(),
            self.project.root(),
            ui,
        )?;
        install_dependencies(
            self.runner,
            &venv_python,
            &self.project.manifest(),
            self.project.root(),
            ui,
        )?;

        let spec = UnitSpec::for_project(self.project, &self.platform, user);
        let registrar = ServiceRegistrar::new(supervisor, &self.project.config().service.unit_dir);
        registrar.register(&spec, ui)?;
        tracing::info!("Deployed {} as {}", spec.file_name(), user);
        Ok(DeployOutcome::Registered)
    }

    fn warn_placeholders(&self, ui: &mut dyn UserInterface) {
        let path = self.project.env_file();
        let keys = EnvFileParser::load(&path)
            .map(|vars| placeholder_keys(&vars))
            .unwrap_or_default();
        if !keys.is_empty() {
            ui.warning(&format!(
                "{} still has template values for: {}",
                path.display(),
                keys.join(", ")
            ));
        }
    }
}
