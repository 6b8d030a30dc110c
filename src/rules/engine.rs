// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::CommitMessage;
use crate::config::LintConfig;
use crate::error::{ConfigError, LintError, Result};
use crate::git;

use super::builtin::{find_builtin, BuiltinRule, Rule};
use super::ignore::IgnoreMatcher;
use super::project::project_rules;
use super::ruleset::ResolvedRules;
use super::spec::RuleSpec;
use super::validator::{ValidationIssue, ValidationResult};

/// A rule bound to its configuration.
#[derive(Debug, Clone)]
struct ConfiguredRule {
    name: String,
    spec: RuleSpec,
    rule: &'static BuiltinRule,
}

/// Rule engine for validating commit messages.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<ConfiguredRule>,
    ignores: IgnoreMatcher,
    help_url: Option<String>,
}

impl RuleEngine {
    /// Create a rule engine for a resolved rule table.
    pub fn new(rules: &ResolvedRules) -> Result<Self> {
        let mut configured = Vec::new();

        for (name, spec) in rules.iter() {
            let rule = find_builtin(name).ok_or_else(|| {
                LintError::Config(ConfigError::UnknownRule {
                    name: name.to_string(),
                })
            })?;

            rule.value_kind()
                .check(spec.constraint.as_ref())
                .map_err(|message| {
                    LintError::Config(ConfigError::InvalidValue {
                        key: format!("rules.{}", name),
                        message,
                    })
                })?;

            if !spec.is_enabled() {
                tracing::debug!("Rule {} is disabled", name);
                continue;
            }

            configured.push(ConfiguredRule {
                name: name.to_string(),
                spec: spec.clone(),
                rule,
            });
        }

        tracing::debug!("Rule engine ready with {} active rules", configured.len());

        Ok(Self {
            rules: configured,
            ignores: IgnoreMatcher::new(true, &[])?,
            help_url: None,
        })
    }

    /// Create a rule engine for the project rule set.
    pub fn project() -> Result<Self> {
        Self::new(project_rules())
    }

    /// Create a rule engine from a loaded configuration.
    pub fn from_config(config: &LintConfig) -> Result<Self> {
        let rules = config.resolve_rules()?;
        let mut engine = Self::new(&rules)?;
        engine.ignores = IgnoreMatcher::new(config.default_ignores, &config.ignores)?;
        engine.help_url = config.help_url.clone();
        Ok(engine)
    }

    /// Names of the active (non-disabled) rules.
    pub fn active_rules(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Validate a parsed commit message.
    pub fn validate(&self, message: &CommitMessage) -> ValidationResult {
        let mut result = ValidationResult::new(message.raw.clone());
        result.help_url = self.help_url.clone();

        if self.ignores.is_ignored(&message.raw) {
            tracing::debug!("Ignoring message: {}", message.header);
            result.ignored = true;
            return result;
        }

        for configured in &self.rules {
            let outcome = configured.rule.check(
                message,
                configured.spec.applicability,
                configured.spec.constraint.as_ref(),
            );

            if outcome.valid {
                result.passed.push(configured.name.clone());
            } else {
                tracing::debug!("Rule {} failed: {}", configured.name, outcome.message);
                result.push(ValidationIssue {
                    code: configured.name.clone(),
                    message: outcome.message,
                    suggestion: outcome.suggestion,
                    severity: configured.spec.severity,
                    line: issue_line(&configured.name, message),
                });
            }
        }

        result
    }

    /// Validate a commit message string.
    pub fn validate_str(&self, message: &str) -> ValidationResult {
        self.validate(&CommitMessage::parse(message))
    }

    /// Check a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<ValidationResult> {
        let (oid, message) = git::get_commit_message(reference)?;
        let mut result = self.validate_str(&message);
        result.commit_sha = Some(oid);
        Ok(result)
    }

    /// Check a range of commits.
    pub fn check_range(&self, range: &str) -> Result<Vec<ValidationResult>> {
        let commits = git::get_commit_range(range)?;
        let mut results = Vec::new();

        for (oid, message) in commits {
            let mut result = self.validate_str(&message);
            result.commit_sha = Some(oid);
            results.push(result);
        }

        Ok(results)
    }
}

/// Line a rule's finding points at: the section start for body and footer
/// rules, the header otherwise.
fn issue_line(rule: &str, message: &CommitMessage) -> Option<usize> {
    if rule.starts_with("body-") {
        message.body_line.or(Some(2))
    } else if rule.starts_with("footer-") {
        message.footer_line
    } else {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::spec::{Applicability, Constraint, Severity};
    use std::collections::BTreeMap;

    #[test]
    fn test_rule_engine_validate() {
        let engine = RuleEngine::project().unwrap();
        let message = CommitMessage::new("feat", "add new feature").with_scope("core");
        let result = engine.validate(&message);
        assert!(result.is_valid());
        assert!(result.rule_passed("type-enum"));
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let mut rules = BTreeMap::new();
        rules.insert(
            "subject-sparkles".to_string(),
            RuleSpec::new(Severity::Error, Applicability::Always),
        );
        let result = RuleEngine::new(&ResolvedRules::from(rules));
        assert!(matches!(
            result,
            Err(LintError::Config(ConfigError::UnknownRule { .. }))
        ));
    }

    #[test]
    fn test_bad_constraint_rejected() {
        let mut rules = BTreeMap::new();
        rules.insert(
            "header-max-length".to_string(),
            RuleSpec::new(Severity::Error, Applicability::Always)
                .with_constraint(Constraint::text("long")),
        );
        let result = RuleEngine::new(&ResolvedRules::from(rules));
        assert!(matches!(
            result,
            Err(LintError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_disabled_rule_skipped() {
        let mut rules = BTreeMap::new();
        rules.insert("type-empty".to_string(), RuleSpec::disabled());
        let engine = RuleEngine::new(&ResolvedRules::from(rules)).unwrap();
        assert_eq!(engine.active_rules().count(), 0);

        let result = engine.validate_str("no type here");
        assert!(result.is_valid());
        assert!(result.passed.is_empty());
    }

    #[test]
    fn test_warning_does_not_invalidate() {
        let mut rules = BTreeMap::new();
        rules.insert(
            "subject-full-stop".to_string(),
            RuleSpec::new(Severity::Warning, Applicability::Never)
                .with_constraint(Constraint::text(".")),
        );
        let engine = RuleEngine::new(&ResolvedRules::from(rules)).unwrap();
        let result = engine.validate_str("fix: typo.");
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_merge_commits_ignored() {
        let engine = RuleEngine::project().unwrap();
        let result = engine.validate_str("Merge branch 'main' into feature/login");
        assert!(result.ignored);
        assert!(result.is_valid());
    }

    #[test]
    fn test_header_trailing_whitespace_fails() {
        let engine = RuleEngine::project().unwrap();

        let result = engine.validate_str("feat: add login page ");
        assert!(!result.is_valid());
        assert_eq!(result.issue("header-trim").unwrap().severity, Severity::Error);

        let result = engine.validate_str("feat: add login page \n\nbody");
        assert!(result.issue("header-trim").is_some());

        assert!(engine.validate_str("feat: add login page\n\n").is_valid());
    }

    #[test]
    fn test_issue_lines() {
        let engine = RuleEngine::project().unwrap();
        let long = "b".repeat(120);
        let result = engine.validate_str(&format!("Fix: x\n\nshort\n{}", long));

        assert_eq!(result.issue("type-enum").unwrap().line, Some(1));
        assert_eq!(result.issue("body-max-line-length").unwrap().line, Some(3));

        let result = engine.validate_str("feat: x\nRefs #1");
        let issue = result.issue("footer-leading-blank").unwrap();
        assert_eq!(issue.line, Some(2));
    }
}
