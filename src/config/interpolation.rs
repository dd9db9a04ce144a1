//! Variable interpolation for templates.
//!
//! The supervisor unit is rendered from a template using `${variable}`
//! syntax.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - `$NAME` (no brace) is left alone, so systemd specifiers like
//!   `$MAINPID` pass through untouched
//!
//! # Example
//!
//! ```
//! use botctl::config::{resolve_string, TemplateVars};
//!
//! let mut vars = TemplateVars::new();
//! vars.insert("user", "deploy");
//! let line = resolve_string("User=${user}", &vars).unwrap();
//! assert_eq!(line, "User=deploy");
//! ```

use crate::error::{BotctlError, Result};
use std::collections::BTreeMap;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
///
/// # Errors
///
/// Returns `TemplateError` for a `${` without a closing brace.
pub fn parse_interpolation(input: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    var_name.push(c);
                }

                if !closed {
                    return Err(BotctlError::TemplateError {
                        message: format!("Unterminated variable: ${{{}", var_name),
                    });
                }

                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    Ok(segments)
}

/// Named values available to a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    /// Create an empty set, pre-filled with `botctl_version`.
    pub fn new() -> Self {
        let mut vars = Self::default();
        vars.insert("botctl_version", env!("CARGO_PKG_VERSION"));
        vars
    }

    /// Set a variable.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Resolve all variables in an interpolated string.
///
/// # Errors
///
/// Returns `TemplateError` if any variable is not defined.
pub fn resolve_string(input: &str, vars: &TemplateVars) -> Result<String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse_interpolation(input)? {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value = vars.resolve(&name).ok_or_else(|| BotctlError::TemplateError {
                    message: format!("Unresolved variable: ${{{}}}", name),
                })?;
                result.push_str(value);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_only() {
        let result = parse_interpolation("hello world").unwrap();
        assert_eq!(result, vec![Segment::Literal("hello world".to_string())]);
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        let result = parse_interpolation("WorkingDirectory=${working_dir}\n").unwrap();
        assert_eq!(
            result,
            vec![
                Segment::Literal("WorkingDirectory=".to_string()),
                Segment::Variable("working_dir".to_string()),
                Segment::Literal("\n".to_string()),
            ]
        );
    }

    #[test]
    fn parse_escaped_dollar_brace() {
        let result = parse_interpolation("$${NOT_INTERPOLATED}").unwrap();
        assert_eq!(
            result,
            vec![Segment::Literal("${NOT_INTERPOLATED}".to_string())]
        );
    }

    #[test]
    fn parse_leaves_systemd_specifiers() {
        let result = parse_interpolation("ExecReload=/bin/kill -HUP $MAINPID").unwrap();
        assert_eq!(
            result,
            vec![Segment::Literal(
                "ExecReload=/bin/kill -HUP $MAINPID".to_string()
            )]
        );
    }

    #[test]
    fn parse_unterminated_is_error() {
        let err = parse_interpolation("User=${user").unwrap_err();
        assert!(matches!(err, BotctlError::TemplateError { .. }));
    }

    #[test]
    fn resolve_string_substitutes_all() {
        let mut vars = TemplateVars::new();
        vars.insert("user", "deploy");
        vars.insert("dir", "/srv/bot");

        let out = resolve_string("User=${user}\nWorkingDirectory=${dir}", &vars).unwrap();

        assert_eq!(out, "User=deploy\nWorkingDirectory=/srv/bot");
    }

    #[test]
    fn resolve_string_unknown_variable_fails() {
        let err = resolve_string("${missing}", &TemplateVars::new()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn builtin_version_is_available() {
        let out = resolve_string("${botctl_version}", &TemplateVars::new()).unwrap();
        assert_eq!(out, env!("CARGO_PKG_VERSION"));
    }
}
