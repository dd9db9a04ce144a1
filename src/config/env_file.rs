//! .env file parsing.
//!
//! The bot reads its own configuration; botctl only looks at the file to
//! report which keys were never filled in after bootstrap.

use crate::error::{BotctlError, Result};
use std::path::Path;

/// Parses .env files into an ordered list of key/value pairs.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use botctl::config::EnvFileParser;
///
/// let content = r#"
/// # Telegram
/// TELEGRAM_API_ID=12345
/// BOT_NAME="support bot"
/// EMPTY=
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars[0], ("TELEGRAM_API_ID".to_string(), "12345".to_string()));
/// assert_eq!(vars[1].1, "support bot");
/// assert_eq!(vars[2].1, "");
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content. Lines without `=` are skipped.
    pub fn parse(content: &str) -> Vec<(String, String)> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let (key, value) = line.split_once('=')?;
        let key = key.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), Self::unquote(value.trim())))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BotctlError::file_missing(path, "Run `botctl install` to create it.")
            } else {
                BotctlError::Io(e)
            }
        })?;
        Ok(Self::parse(&content))
    }
}

/// Whether a value still looks like the template's example text.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value.starts_with("your_") || value.ends_with("_here")
}

/// Keys whose values are empty or still hold template placeholders.
pub fn placeholder_keys(vars: &[(String, String)]) -> Vec<String> {
    vars.iter()
        .filter(|(_, value)| value.trim().is_empty() || is_placeholder(value))
        .map(|(key, _)| key.clone())
        .collect()
}
