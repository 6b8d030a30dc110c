// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Messages that are exempt from linting.

use crate::error::{ConfigError, LintError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Messages generated by git or hosting platforms.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"(?m)^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?)))(?:\r?\n)*$)",
        r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
        r#"^(R|r)evert (.*)"#,
        r"^(amend|fixup|squash)!",
        r"^(Merged (.*?)(in|into) (.*)|Merged PR (.*): (.*))",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Matcher for ignored commit messages.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    use_defaults: bool,
    custom: Vec<Regex>,
}

impl IgnoreMatcher {
    /// Build a matcher from user patterns, optionally including the defaults.
    pub fn new(use_defaults: bool, patterns: &[String]) -> Result<Self> {
        let custom = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    LintError::Config(ConfigError::InvalidValue {
                        key: "ignores".to_string(),
                        message: format!("invalid pattern '{}': {}", pattern, e),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            use_defaults,
            custom,
        })
    }

    /// Whether `message` should be skipped.
    pub fn is_ignored(&self, message: &str) -> bool {
        let defaults: &[Regex] = if self.use_defaults {
            &DEFAULT_IGNORES
        } else {
            &[]
        };
        defaults
            .iter()
            .chain(self.custom.iter())
            .any(|re| re.is_match(message))
    }
}
