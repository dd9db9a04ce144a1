//! Platform adapters.
//!
//! The same workflows run on Unix and Windows hosts. Everything that differs
//! between the two (interpreter names, virtualenv layout, `PATH` separator,
//! whether a service supervisor exists) is answered here, at run time.

use std::path::{Path, PathBuf};

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Unix,
    Windows,
}

impl OsFamily {
    /// Family of the running host.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }
}

/// Host facts the workflows depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub family: OsFamily,
    /// Whether a systemd supervisor is running on this host.
    pub has_systemd: bool,
}

impl Platform {
    /// Detect the running host.
    pub fn detect() -> Self {
        let family = OsFamily::current();
        let has_systemd = cfg!(target_os = "linux") && Path::new("/run/systemd/system").is_dir();
        tracing::debug!(?family, has_systemd, "Detected platform");
        Self {
            family,
            has_systemd,
        }
    }

    /// A Unix host with systemd, for tests.
    pub fn linux() -> Self {
        Self {
            family: OsFamily::Unix,
            has_systemd: true,
        }
    }

    /// A Windows host, for tests.
    pub fn windows() -> Self {
        Self {
            family: OsFamily::Windows,
            has_systemd: false,
        }
    }

    /// Interpreter executable names, in lookup order.
    pub fn interpreter_candidates(&self) -> &'static [&'static str] {
        match self.family {
            OsFamily::Unix => &["python3", "python"],
            OsFamily::Windows => &["python", "py"],
        }
    }

    /// Separator between `PATH` entries.
    pub fn path_separator(&self) -> char {
        match self.family {
            OsFamily::Unix => ':',
            OsFamily::Windows => ';',
        }
    }

    /// Split a `PATH` value into directories, dropping empty entries.
    pub fn split_path(&self, value: &str) -> Vec<PathBuf> {
        value
            .split(self.path_separator())
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// Directory holding executables inside a virtualenv.
    pub fn venv_bin_dir(&self, venv: &Path) -> PathBuf {
        match self.family {
            OsFamily::Unix => venv.join("bin"),
            OsFamily::Windows => venv.join("Scripts"),
        }
    }

    /// Interpreter inside a virtualenv.
    pub fn venv_python(&self, venv: &Path) -> PathBuf {
        match self.family {
            OsFamily::Unix => self.venv_bin_dir(venv).join("python"),
            OsFamily::Windows => self.venv_bin_dir(venv).join("python.exe"),
        }
    }

    /// Whether services can be registered with a supervisor.
    pub fn supports_supervisor(&self) -> bool {
        self.family == OsFamily::Unix && self.has_systemd
    }
}

/// The account a service should run as.
///
/// Prefers the user who invoked `sudo`, then the current user.
pub fn invoking_user<F>(env_fn: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    ["SUDO_USER", "USER", "USERNAME"]
        .iter()
        .filter_map(|key| env_fn(key).ok())
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "root".to_string())
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    is_ci_with(|key| std::env::var(key))
}

/// [`is_ci`] over an arbitrary environment lookup.
pub fn is_ci_with<F>(env_fn: F) -> bool
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    [
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
    ]
    .iter()
    .any(|key| env_fn(key).is_ok())
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}
