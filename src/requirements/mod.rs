//! Requirement detection.
//!
//! This module locates the interpreter and its package manager on the host
//! and reports whether the files the workflows depend on are present.
//!
//! # Modules
//!
//! - [`probe`] - Environment prober for the interpreter and pip
//! - [`status`] - Requirement status types for probe results
//! - [`version`] - Interpreter version parsing

pub mod probe;
pub mod status;
pub mod version;

pub use probe::{
    is_executable, parse_system_path, resolve_tool_path, EnvironmentProber, Interpreter,
    PackageManagerState,
};
pub use status::{ProbeReport, RequirementCheck, RequirementStatus};
pub use version::PythonVersion;
