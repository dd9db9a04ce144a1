//! Configuration bootstrap.
//!
//! The bot reads its secrets from `.env`. A fresh checkout only carries the
//! template, so the first run copies it into place. An existing `.env` is
//! never touched.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{BotctlError, Result};
use crate::ui::UserInterface;

/// What the bootstrapper did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The configuration file already existed and was left alone.
    AlreadyPresent,
    /// The template was copied into place.
    Created,
}

/// Copy `template` to `destination` unless `destination` already exists.
///
/// The copy is byte-for-byte; nothing is parsed. The destination is opened
/// with `create_new`, so a file that appears between the check and the
/// copy is still not overwritten.
///
/// # Errors
///
/// `FileMissing` when the template is absent, `Io` for any other failure.
pub fn bootstrap_config(
    template: &Path,
    destination: &Path,
    ui: &mut dyn UserInterface,
) -> Result<BootstrapOutcome> {
    if destination.exists() {
        tracing::debug!("{} exists, leaving it alone", destination.display());
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let mut source = File::open(template).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BotctlError::file_missing(
            template,
            format!(
                "Cannot create {} without its template.",
                file_label(destination)
            ),
        ),
        _ => BotctlError::Io(e),
    })?;

    let mut target = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(BootstrapOutcome::AlreadyPresent);
        }
        Err(e) => return Err(e.into()),
    };

    io::copy(&mut source, &mut target)?;
    target.sync_all()?;

    tracing::info!(
        "Created {} from {}",
        destination.display(),
        template.display()
    );
    ui.success(&format!(
        "Created {} from {}",
        file_label(destination),
        file_label(template)
    ));
    ui.warning(&format!(
        "Edit {} and fill in your credentials before starting the bot",
        file_label(destination)
    ));

    Ok(BootstrapOutcome::Created)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &[u8] = b"OPENAI_API_KEY=your_openai_api_key_here\r\nBOT_NAME=support\xc3\xa9\n";

    #[test]
    fn absent_destination_becomes_byte_identical_copy() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("env_example.txt");
        let destination = temp.path().join(".env");
        fs::write(&template, TEMPLATE).unwrap();
        let mut ui = MockUI::new();

        let outcome = bootstrap_config(&template, &destination, &mut ui).unwrap();

        assert_eq!(outcome, BootstrapOutcome::Created);
        assert_eq!(fs::read(&destination).unwrap(), TEMPLATE);
        assert!(ui.has_warning(".env"));
    }

    #[test]
    fn existing_destination_is_left_untouched() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("env_example.txt");
        let destination = temp.path().join(".env");
        fs::write(&template, TEMPLATE).unwrap();
        fs::write(&destination, "OPENAI_API_KEY=sk-real\n").unwrap();
        let mut ui = MockUI::new();

        let outcome = bootstrap_config(&template, &destination, &mut ui).unwrap();

        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "OPENAI_API_KEY=sk-real\n"
        );
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn existing_destination_wins_even_without_template() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join(".env");
        fs::write(&destination, "A=1\n").unwrap();

        let outcome = bootstrap_config(
            &temp.path().join("env_example.txt"),
            &destination,
            &mut MockUI::new(),
        )
        .unwrap();

        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
    }

    #[test]
    fn missing_template_is_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = bootstrap_config(
            &temp.path().join("env_example.txt"),
            &temp.path().join(".env"),
            &mut MockUI::new(),
        )
        .unwrap_err();

        assert!(matches!(err, BotctlError::FileMissing { .. }));
        assert!(err.to_string().contains("env_example.txt"));
        assert!(!temp.path().join(".env").exists());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("env_example.txt");
        let destination = temp.path().join(".env");
        fs::write(&template, TEMPLATE).unwrap();
        let mut ui = MockUI::new();

        bootstrap_config(&template, &destination, &mut ui).unwrap();
        fs::write(&destination, "EDITED=1\n").unwrap();
        let second = bootstrap_config(&template, &destination, &mut ui).unwrap();

        assert_eq!(second, BootstrapOutcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&destination).unwrap(), "EDITED=1\n");
    }
}
