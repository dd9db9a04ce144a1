//! Configuration file discovery and loading.
//!
//! A project does not need any configuration file: every setting has a
//! default. When present, files are merged in this order (later wins):
//!
//! 1. Project config (`.botctl/config.yml`)
//! 2. Local overrides (`.botctl/config.local.yml`)
//!
//! An explicit `--config` path replaces discovery entirely.

use crate::config::merger::merge_configs;
use crate::config::schema::BotctlConfig;
use crate::config::validator::validate;
use crate::error::{BotctlError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".botctl";

/// Paths to configuration files in priority order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .botctl/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .botctl/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BotctlError::file_missing(path, "Check the --config path.")
        } else {
            BotctlError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| BotctlError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse a merged YAML value into a validated config.
fn from_value(value: serde_yaml::Value, source: &Path) -> Result<BotctlConfig> {
    let value = if value.is_null() {
        serde_yaml::Value::Mapping(Default::default())
    } else {
        value
    };
    let config: BotctlConfig =
        serde_yaml::from_value(value).map_err(|e| BotctlError::ConfigParseError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
    validate(&config)?;
    Ok(config)
}

/// Load and merge all config files for a project.
///
/// Returns the defaults when no file exists.
pub fn load_merged_config(project_root: &Path) -> Result<BotctlConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    from_value(
        merge_configs(&configs),
        &project_root.join(CONFIG_DIR).join("config.yml"),
    )
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<BotctlConfig> {
    match config_override {
        Some(path) => from_value(load_config_value(path)?, path),
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, BotctlConfig::default());
    }

    #[test]
    fn empty_config_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, BotctlConfig::default());
    }

    #[test]
    fn local_overrides_project() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "app_name: Bot\nservice:\n  name: bot\n  user: root\n",
        );
        write_config(temp.path(), "config.local.yml", "service:\n  user: deploy\n");

        let config = load_merged_config(temp.path()).unwrap();

        assert_eq!(config.app_name, "Bot");
        assert_eq!(config.service.name, "bot");
        assert_eq!(config.service.user.as_deref(), Some("deploy"));
    }

    #[test]
    fn discover_returns_in_merge_order() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");
        write_config(temp.path(), "config.local.yml", "");

        let paths = ConfigPaths::discover(temp.path());
        let all = paths.all_existing();

        assert_eq!(all.len(), 2);
        assert!(all[0].ends_with("config.yml"));
        assert!(all[1].ends_with("config.local.yml"));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "service: [unclosed");

        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, BotctlError::ConfigParseError { .. }));
    }

    #[test]
    fn override_path_skips_discovery() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "app_name: Discovered\n");
        let custom = temp.path().join("custom.yml");
        fs::write(&custom, "app_name: Custom\n").unwrap();

        let config = load_config(temp.path(), Some(&custom)).unwrap();
        assert_eq!(config.app_name, "Custom");
    }

    #[test]
    fn missing_override_path_is_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, BotctlError::FileMissing { .. }));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "service:\n  name: ''\n");

        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, BotctlError::ConfigValidationError { .. }));
    }
}
