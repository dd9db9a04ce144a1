//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - The unit name must be a usable systemd unit name
//! - The archive prefix must be a plain file name fragment
//! - `python.min_version` must parse as a version
//! - Paths must stay inside the working directory
//! - Status limits must be positive

use crate::config::schema::BotctlConfig;
use crate::error::{BotctlError, Result};
use crate::requirements::PythonVersion;
use std::path::{Component, Path};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &BotctlConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = &config.service.name;
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
    {
        errors.push(ValidationError::new(
            "service-name",
            format!(
                "service.name '{}' must be non-empty and use only letters, digits, '-', '_', '.', '@'",
                name
            ),
        ));
    } else if name.ends_with(".service") {
        errors.push(ValidationError::new(
            "service-name",
            format!(
                "service.name '{}' must not include the '.service' suffix",
                name
            ),
        ));
    }

    let prefix = &config.archive.prefix;
    if prefix.is_empty() || prefix.contains(['/', '\\']) {
        errors.push(ValidationError::new(
            "archive-prefix",
            format!("archive.prefix '{}' must be a non-empty file name", prefix),
        ));
    }

    if config.python.min_version.parse::<PythonVersion>().is_err() {
        errors.push(ValidationError::new(
            "min-version",
            format!(
                "python.min_version '{}' is not a version like 3.8",
                config.python.min_version
            ),
        ));
    }

    let paths = [
        ("paths.env_file", &config.paths.env_file),
        ("paths.env_template", &config.paths.env_template),
        ("paths.manifest", &config.paths.manifest),
        ("paths.entry_point", &config.paths.entry_point),
        ("paths.venv", &config.paths.venv),
    ];
    for (key, path) in paths {
        if !is_contained(path) {
            errors.push(ValidationError::new(
                "path-escape",
                format!(
                    "{} '{}' must be a relative path inside the working directory",
                    key,
                    path.display()
                ),
            ));
        }
    }

    if config.status.journal_lines == 0 {
        errors.push(ValidationError::new(
            "journal-lines",
            "status.journal_lines must be at least 1".to_string(),
        ));
    }

    errors
}

fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Validate a configuration, returning the first failure as an error.
pub fn validate(config: &BotctlConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BotctlError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
