// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structure of lintcommit.toml.

use crate::rules::{project_rule_set, ResolvedRules, RuleSet, RuleSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The main configuration structure for lintcommit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Base rule sets: preset names or relative paths to other config files.
    pub extends: Vec<String>,

    /// Whether the built-in ignore patterns (merges, reverts, fixups) apply.
    pub default_ignores: bool,

    /// Extra regexes; matching messages are not linted.
    pub ignores: Vec<String>,

    /// Link printed after failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Local rules, overriding the ones inherited via `extends`.
    pub rules: BTreeMap<String, RuleSpec>,

    /// UI/UX configuration.
    pub ui: UiConfig,

    /// Directory of the file this configuration was loaded from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for LintConfig {
    fn default() -> Self {
        let project = project_rule_set();
        Self {
            extends: project.extends.clone(),
            default_ignores: true,
            ignores: Vec::new(),
            help_url: None,
            rules: project.rules.clone(),
            ui: UiConfig::default(),
            base_dir: None,
        }
    }
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// The declared rule set of this configuration.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet {
            extends: self.extends.clone(),
            rules: self.rules.clone(),
        }
    }

    /// Merge the rules of every `extends` entry and the local rules.
    pub fn resolve_rules(&self) -> crate::error::Result<ResolvedRules> {
        super::loader::resolve_rules(self)
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{presets, project_rules};

    #[test]
    fn test_default_config_is_project_rule_set() {
        let config = LintConfig::default();
        assert_eq!(config.extends, vec![presets::CONVENTIONAL.to_string()]);
        assert_eq!(config.rules.len(), 4);
        assert!(config.default_ignores);
        assert_eq!(&config.resolve_rules().unwrap(), project_rules());
    }

    #[test]
    fn test_config_serialization() {
        let config = LintConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("type-enum"));
        assert!(toml_str.contains("extends"));
        assert!(!toml_str.contains("base_dir"));
    }
}
