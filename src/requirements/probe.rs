//! Environment prober for the interpreter and its package manager.
//!
//! Tools are located by walking `PATH` entries directly rather than asking
//! `which`, whose behaviour varies across systems. Once an interpreter is
//! found, its version and its `pip` module are checked by running it.
//!
//! # Example
//!
//! ```no_run
//! use botctl::requirements::EnvironmentProber;
//! use botctl::shell::{Platform, SystemRunner};
//!
//! let prober = EnvironmentProber::new(&SystemRunner, Platform::detect());
//! match prober.find_interpreter() {
//!     Some(interp) => println!("python {} at {}", interp.version, interp.path.display()),
//!     None => println!("no python on PATH"),
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{BotctlError, Result};
use crate::shell::{execute_check, execute_quiet, CommandLine, CommandRunner, Platform};

use super::status::{ProbeReport, RequirementStatus};
use super::version::PythonVersion;

/// A located interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpreter {
    /// Absolute path to the executable.
    pub path: PathBuf,
    /// Version reported by `--version`.
    pub version: PythonVersion,
}

impl Interpreter {
    /// Command line running this interpreter with `args`.
    pub fn command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::new(self.path.display().to_string()).args(args)
    }
}

/// Outcome of making sure the package manager is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerState {
    /// It was already installed.
    Present,
    /// It was missing and the single remediation attempt installed it.
    Remediated,
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", tool));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path(platform: &Platform) -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| platform.split_path(&path.to_string_lossy()))
        .unwrap_or_default()
}

/// Probes the host for the tools the workflows need.
pub struct EnvironmentProber<'a> {
    runner: &'a dyn CommandRunner,
    platform: Platform,
    path_entries: Vec<PathBuf>,
}

impl<'a> EnvironmentProber<'a> {
    /// Create a prober searching the system `PATH`.
    pub fn new(runner: &'a dyn CommandRunner, platform: Platform) -> Self {
        Self {
            runner,
            platform,
            path_entries: parse_system_path(&platform),
        }
    }

    /// Search these directories instead of the system `PATH`.
    pub fn with_path(mut self, path_entries: Vec<PathBuf>) -> Self {
        self.path_entries = path_entries;
        self
    }

    /// Resolve an arbitrary tool on the search path.
    pub fn find_tool(&self, tool: &str) -> Option<PathBuf> {
        resolve_tool_path(tool, &self.path_entries)
    }

    /// Find the first interpreter candidate that runs and reports a version.
    pub fn find_interpreter(&self) -> Option<Interpreter> {
        self.platform
            .interpreter_candidates()
            .iter()
            .filter_map(|name| resolve_tool_path(name, &self.path_entries))
            .find_map(|path| self.interpreter_at(&path))
    }

    /// Query the interpreter at `path` for its version.
    pub fn interpreter_at(&self, path: &Path) -> Option<Interpreter> {
        let cmd = CommandLine::new(path.display().to_string()).arg("--version");
        let out = execute_quiet(self.runner, &cmd, None).ok()?;
        if !out.success {
            return None;
        }
        let banner = if out.stdout.trim().is_empty() {
            &out.stderr
        } else {
            &out.stdout
        };
        let version = PythonVersion::from_banner(banner)?;
        tracing::debug!("Found interpreter {} ({})", path.display(), version);
        Some(Interpreter {
            path: path.to_path_buf(),
            version,
        })
    }

    /// Find an interpreter no older than `minimum`, or fail.
    pub fn require_interpreter(&self, minimum: PythonVersion) -> Result<Interpreter> {
        let interp = self.find_interpreter().ok_or_else(|| {
            BotctlError::tool_missing(
                self.platform.interpreter_candidates()[0],
                format!("Install Python {} or newer and make sure it is on PATH.", minimum),
            )
        })?;

        if interp.version < minimum {
            return Err(BotctlError::VersionTooOld {
                found: interp.version.to_string(),
                required: minimum.to_string(),
            });
        }

        Ok(interp)
    }

    /// Whether `<interp> -m pip --version` succeeds.
    pub fn has_package_manager(&self, interp: &Interpreter) -> bool {
        execute_check(self.runner, &interp.command(["-m", "pip", "--version"]), None)
    }

    /// Make sure pip is usable, attempting one installation if it is not.
    pub fn ensure_package_manager(&self, interp: &Interpreter) -> Result<PackageManagerState> {
        if self.has_package_manager(interp) {
            return Ok(PackageManagerState::Present);
        }

        tracing::info!("pip not available, trying ensurepip");
        let remediation = interp.command(["-m", "ensurepip", "--upgrade"]);
        let installed = execute_quiet(self.runner, &remediation, None)
            .map(|r| r.success)
            .unwrap_or(false);

        if installed && self.has_package_manager(interp) {
            Ok(PackageManagerState::Remediated)
        } else {
            Err(BotctlError::tool_missing(
                "pip",
                "Automatic installation failed. Install it with your OS package manager \
                 (for example: apt install python3-pip).",
            ))
        }
    }

    /// Report presence of interpreter, package manager and `config_file`.
    ///
    /// Never remediates anything.
    pub fn report(&self, config_file: &Path) -> ProbeReport {
        let mut report = ProbeReport::default();

        let interp = self.find_interpreter();
        match &interp {
            Some(i) => report.push(
                "python",
                RequirementStatus::Satisfied {
                    path: i.path.clone(),
                    version: Some(i.version),
                },
            ),
            None => report.push(
                "python",
                RequirementStatus::Missing {
                    hint: "Install Python 3 and make sure it is on PATH".to_string(),
                },
            ),
        }

        let pip = match &interp {
            Some(i) if self.has_package_manager(i) => RequirementStatus::Satisfied {
                path: i.path.clone(),
                version: None,
            },
            _ => RequirementStatus::Missing {
                hint: "Run 'python3 -m ensurepip --upgrade'".to_string(),
            },
        };
        report.push("pip", pip);

        let config = if config_file.is_file() {
            RequirementStatus::Satisfied {
                path: config_file.to_path_buf(),
                version: None,
            }
        } else {
            RequirementStatus::Missing {
                hint: "Run 'botctl install' to create it from the template".to_string(),
            }
        };
        let name = config_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| config_file.display().to_string());
        report.push(&name, config);

        report
    }
}
