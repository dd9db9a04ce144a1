//! Supervisor unit rendering.

use std::path::{Path, PathBuf};

use crate::config::{resolve_string, TemplateVars};
use crate::error::Result;
use crate::project::Project;
use crate::shell::Platform;

/// Unit template. The restart policy is not a variable.
pub const UNIT_TEMPLATE: &str = r#"# Generated by botctl ${botctl_version}
[Unit]
Description=${description}
After=network-online.target
Wants=network-online.target

[Service]
Type=simple
User=${user}
WorkingDirectory=${working_dir}
Environment="PATH=${venv_bin}:/usr/local/bin:/usr/bin:/bin"
Environment=PYTHONUNBUFFERED=1
ExecStart=${exec_start}
Restart=always
RestartSec=10

[Install]
WantedBy=multi-user.target
"#;

/// Everything that varies between rendered units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    /// Unit name, without `.service`.
    pub name: String,
    /// `Description=` line.
    pub description: String,
    /// Account the bot runs as.
    pub user: String,
    /// Bot working directory.
    pub working_dir: PathBuf,
    /// Executable directory of the isolated environment.
    pub venv_bin: PathBuf,
    /// Interpreter inside the isolated environment.
    pub python: PathBuf,
    /// Script the interpreter runs.
    pub entry_point: PathBuf,
}

impl UnitSpec {
    /// Describe the unit for `project`, running as `user`.
    pub fn for_project(project: &Project, platform: &Platform, user: &str) -> Self {
        let service = &project.config().service;
        let venv = project.venv();
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            user: user.to_string(),
            working_dir: project.root().to_path_buf(),
            venv_bin: platform.venv_bin_dir(&venv),
            python: platform.venv_python(&venv),
            entry_point: project.entry_point(),
        }
    }

    /// `<name>.service`
    pub fn file_name(&self) -> String {
        unit_file_name(&self.name)
    }

    /// The `ExecStart=` command line.
    pub fn exec_start(&self) -> String {
        format!(
            "{} {}",
            quote_arg(&self.python),
            quote_arg(&self.entry_point)
        )
    }

    /// Render the unit file contents.
    pub fn render(&self) -> Result<String> {
        let mut vars = TemplateVars::new();
        vars.insert("description", self.description.as_str());
        vars.insert("user", self.user.as_str());
        vars.insert("working_dir", self.working_dir.display().to_string());
        vars.insert("venv_bin", self.venv_bin.display().to_string());
        vars.insert("exec_start", self.exec_start());
        resolve_string(UNIT_TEMPLATE, &vars)
    }
}

/// `<name>.service`
pub fn unit_file_name(name: &str) -> String {
    format!("{}.service", name)
}

/// Quote an `ExecStart=` argument when it contains whitespace.
fn quote_arg(path: &Path) -> String {
    let text = path.display().to_string();
    if text.contains(char::is_whitespace) {
        format!("\"{}\"", text)
    } else {
        text
    }
}
