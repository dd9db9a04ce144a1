//! Archive exclusion patterns.

use std::path::{Component, Path};

/// Match `name` against a glob supporting `*` and `?`.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some('?') => {
                p += 1;
                n += 1;
            }
            Some(c) if *c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                // Let the last star swallow one more character.
                Some((star, matched)) => {
                    p = star + 1;
                    n = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|c| *c == '*')
}

/// Patterns matched against every component of a relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any component of `rel_path` matches a pattern.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        rel_path.components().any(|component| match component {
            Component::Normal(part) => {
                let part = part.to_string_lossy();
                self.patterns.iter().any(|p| glob_match(p, &part))
            }
            _ => false,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
