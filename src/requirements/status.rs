//! Requirement status types for environment probing.
//!
//! Each probe produces a `RequirementStatus` that describes whether a tool
//! or file needed by the workflows is available on this host.

use std::path::PathBuf;

use super::version::PythonVersion;

/// The result of checking a single requirement.
#[derive(Debug, Clone, PartialEq)]
pub enum RequirementStatus {
    /// Tool or file is present.
    Satisfied {
        /// Where it was found.
        path: PathBuf,
        /// Reported version, when the tool has one.
        version: Option<PythonVersion>,
    },

    /// Tool or file is not present.
    Missing {
        /// Human-readable remediation instructions
        hint: String,
    },
}

impl RequirementStatus {
    /// Whether the requirement is satisfied.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, RequirementStatus::Satisfied { .. })
    }

    /// Path of a satisfied requirement.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            RequirementStatus::Satisfied { path, .. } => Some(path),
            RequirementStatus::Missing { .. } => None,
        }
    }
}

/// The result of checking one named requirement.
#[derive(Debug, Clone)]
pub struct RequirementCheck {
    /// Requirement name ("python", "pip", ".env")
    pub requirement: String,
    /// The status of the requirement
    pub status: RequirementStatus,
}

/// Presence report for everything the workflows need.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    /// One entry per requirement, in probe order.
    pub checks: Vec<RequirementCheck>,
}

impl ProbeReport {
    /// Record a check.
    pub fn push(&mut self, requirement: &str, status: RequirementStatus) {
        self.checks.push(RequirementCheck {
            requirement: requirement.to_string(),
            status,
        });
    }

    /// Look up a requirement by name.
    pub fn get(&self, requirement: &str) -> Option<&RequirementStatus> {
        self.checks
            .iter()
            .find(|c| c.requirement == requirement)
            .map(|c| &c.status)
    }

    /// Names of missing requirements.
    pub fn missing(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.status.is_satisfied())
            .map(|c| c.requirement.as_str())
            .collect()
    }
}
