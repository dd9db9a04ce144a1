//! Library integration tests.

use std::fs;

use botctl::config::{load_config, BotctlConfig};
use botctl::project::Project;
use botctl::service::{ServiceRegistrar, Systemd, UnitSpec};
use botctl::shell::{Platform, ScriptedRunner};
use botctl::ui::MockUI;
use botctl::BotctlError;
use tempfile::TempDir;

#[test]
fn error_types_are_public() {
    let err = BotctlError::ToolMissing {
        tool: "systemctl".into(),
        hint: "Install systemd".into(),
    };
    assert!(err.to_string().contains("systemctl"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> botctl::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use botctl::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["botctl", "uninstall", "--yes"]);

    if let Commands::Uninstall(args) = cli.command {
        assert!(args.yes);
    } else {
        panic!("Expected Uninstall command");
    }
}

#[test]
fn local_config_overlays_project_config() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".botctl");
    fs::create_dir(&dir).unwrap();
    fs::write(
        dir.join("config.yml"),
        "app_name: Support Bot\nservice:\n  name: support-bot\n  description: Support\n",
    )
    .unwrap();
    fs::write(dir.join("config.local.yml"), "service:\n  user: deploy\n").unwrap();

    let config = load_config(temp.path(), None).unwrap();

    assert_eq!(config.app_name, "Support Bot");
    assert_eq!(config.service.name, "support-bot");
    assert_eq!(config.service.description, "Support");
    assert_eq!(config.service.user.as_deref(), Some("deploy"));
}

#[test]
fn rendered_unit_is_registered_in_order() {
    let unit_dir = TempDir::new().unwrap();
    let mut config = BotctlConfig::default();
    config.service.unit_dir = unit_dir.path().to_path_buf();
    let project = Project::with_config("/srv/support bot", config);
    let runner = ScriptedRunner::new();
    let systemd = Systemd::new(&runner);
    let spec = UnitSpec::for_project(&project, &Platform::linux(), "deploy");

    let path = ServiceRegistrar::new(&systemd, unit_dir.path())
        .register(&spec, &mut MockUI::new())
        .unwrap();

    let unit = fs::read_to_string(path).unwrap();
    assert!(unit.contains("WorkingDirectory=/srv/support bot"));
    assert!(unit.contains("User=deploy"));
    assert!(unit.contains("Restart=always"));
    assert!(unit.contains("RestartSec=10"));
    let calls: Vec<String> = runner.calls().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        calls,
        vec![
            "systemctl daemon-reload",
            "systemctl enable telegram-bot.service",
            "systemctl start telegram-bot.service",
            "systemctl status telegram-bot.service --no-pager",
        ]
    );
}
