// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule sets and their resolution.

use crate::error::{ConfigError, LintError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::presets;
use super::spec::RuleSpec;

/// A declared rule set: base rule sets to inherit from plus local rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSet {
    /// Base rule sets, merged in order before the local rules.
    pub extends: Vec<String>,

    /// Local rules, keyed by rule name.
    pub rules: BTreeMap<String, RuleSpec>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a base rule set reference.
    pub fn extend(mut self, base: impl Into<String>) -> Self {
        self.extends.push(base.into());
        self
    }

    /// Build a rule set from `(name, spec)` entries, rejecting duplicate names.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, RuleSpec)>,
        S: Into<String>,
    {
        let mut rules = BTreeMap::new();
        for (name, spec) in entries {
            let name = name.into();
            if rules.contains_key(&name) {
                return Err(LintError::Config(ConfigError::DuplicateRule { name }));
            }
            rules.insert(name, spec);
        }
        Ok(Self {
            extends: Vec::new(),
            rules,
        })
    }

    /// Resolve the rule set against the built-in presets.
    ///
    /// File-based `extends` entries need a base directory and are handled by
    /// the configuration loader.
    pub fn resolve(&self) -> Result<ResolvedRules> {
        let mut resolved = ResolvedRules::default();
        for name in &self.extends {
            let base = presets::find_preset(name).ok_or_else(|| {
                LintError::Config(ConfigError::UnknownPreset { name: name.clone() })
            })?;
            resolved.overlay(&base.resolve()?);
        }
        resolved.overlay_rules(&self.rules);
        Ok(resolved)
    }
}

/// A fully merged rule table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedRules {
    rules: BTreeMap<String, RuleSpec>,
}

impl ResolvedRules {
    /// Overlay another resolved table; its entries win.
    pub fn overlay(&mut self, other: &ResolvedRules) {
        self.overlay_rules(&other.rules);
    }

    /// Overlay raw rule entries; they win.
    pub fn overlay_rules(&mut self, rules: &BTreeMap<String, RuleSpec>) {
        for (name, spec) in rules {
            self.rules.insert(name.clone(), spec.clone());
        }
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.rules.get(name)
    }

    /// Iterate over rules in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.rules.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of rules, including disabled ones.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<BTreeMap<String, RuleSpec>> for ResolvedRules {
    fn from(rules: BTreeMap<String, RuleSpec>) -> Self {
        Self { rules }
    }
}
