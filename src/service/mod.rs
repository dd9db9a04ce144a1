//! Supervised service management.
//!
//! - [`unit`] - Unit file rendering
//! - [`supervisor`] - The [`Supervisor`] trait and its systemd adapter
//! - [`registrar`] - Writing, enabling and removing units

pub mod registrar;
pub mod supervisor;
pub mod unit;

pub use registrar::ServiceRegistrar;
pub use supervisor::{Supervisor, Systemd};
pub use unit::{unit_file_name, UnitSpec, UNIT_TEMPLATE};

use crate::error::{BotctlError, Result};
use crate::requirements::EnvironmentProber;
use crate::shell::Platform;

/// Fail unless this host can register supervised services.
pub fn require_supervisor(platform: &Platform, prober: &EnvironmentProber<'_>) -> Result<()> {
    if !platform.supports_supervisor() {
        return Err(BotctlError::tool_missing(
            "systemctl",
            "Supervised mode needs a Linux host running systemd. Use `botctl start` to run the bot directly.",
        ));
    }
    if prober.find_tool("systemctl").is_none() {
        return Err(BotctlError::tool_missing(
            "systemctl",
            "systemd appears to be running but systemctl is not on PATH.",
        ));
    }
    Ok(())
}
