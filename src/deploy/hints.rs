//! Hints for common package manager failures.
//!
//! Output captured from a failed command is matched against known
//! patterns; the first match becomes the hint under the error block.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

lazy_regex!(RE_EXTERNALLY_MANAGED, r"externally-managed-environment");
lazy_regex!(
    RE_NO_DISTRIBUTION,
    r"No matching distribution found for ([^\s]+)"
);
lazy_regex!(RE_PERMISSION_DENIED, r"Permission denied|EACCES");
lazy_regex!(
    RE_NETWORK,
    r"Temporary failure in name resolution|Could not fetch URL|NewConnectionError|ConnectTimeout"
);
lazy_regex!(
    RE_BUILD_TOOLS,
    r"Microsoft Visual C\+\+|gcc: (?:error|command not found)|error: command '[^']*gcc'"
);
lazy_regex!(
    RE_ENSUREPIP,
    r"ensurepip is not available|No module named venv|No module named ensurepip"
);

/// Find a hint for captured command output.
pub fn find_hint(output: &str) -> Option<String> {
    if RE_EXTERNALLY_MANAGED.is_match(output) {
        return Some(
            "The system Python refuses global installs. Run `botctl deploy` to use a virtualenv, \
             or activate one before `botctl start`."
                .to_string(),
        );
    }
    if let Some(caps) = RE_NO_DISTRIBUTION.captures(output) {
        return Some(format!(
            "Check the spelling and version pin of {} in requirements.txt.",
            &caps[1]
        ));
    }
    if RE_ENSUREPIP.is_match(output) {
        return Some(
            "Install the venv module (for example: apt install python3-venv).".to_string(),
        );
    }
    if RE_PERMISSION_DENIED.is_match(output) {
        return Some(
            "Install into a virtualenv, or re-run with sufficient permissions.".to_string(),
        );
    }
    if RE_NETWORK.is_match(output) {
        return Some("Check network access to the package index.".to_string());
    }
    if RE_BUILD_TOOLS.is_match(output) {
        return Some("A package needs a C compiler to build. Install build tools.".to_string());
    }
    None
}
