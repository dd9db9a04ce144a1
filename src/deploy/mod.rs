//! Deployment stages and the workflows built from them.
//!
//! - [`bootstrap`] - Create the configuration file from its template
//! - [`installer`] - Install the bot's Python dependencies
//! - [`venv`] - Isolated environment for supervised deployments
//! - [`launcher`] - Run the bot directly or through the supervisor
//! - [`workflow`] - The command pipelines
//! - [`hints`] - Remediation hints for failed commands

pub mod bootstrap;
pub mod hints;
pub mod installer;
pub mod launcher;
pub mod venv;
pub mod workflow;

pub use bootstrap::{bootstrap_config, BootstrapOutcome};
pub use hints::find_hint;
pub use installer::install_dependencies;
pub use launcher::{launch_direct, launch_supervised, LaunchMode};
pub use venv::{ensure_venv, VenvOutcome};
pub use workflow::{DeployOutcome, Deployment};
