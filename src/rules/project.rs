// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The project's commit rule set.
//!
//! Aligned with the semantic-release configuration: the commit types below are
//! the ones the release pipeline knows how to classify.

use lazy_static::lazy_static;

use super::presets::{self, CONVENTIONAL};
use super::ruleset::{ResolvedRules, RuleSet};
use super::spec::{Applicability, Constraint, RuleSpec, Severity};

/// Commit types accepted by the release pipeline.
///
/// `feat` triggers a minor release; `fix`, `perf` and `revert` a patch
/// release; the rest do not release.
pub const RELEASE_TYPES: &[&str] = &[
    "feat", "fix", "perf", "revert", "docs", "style", "refactor", "test", "build", "tool", "ci",
    "chore",
];

lazy_static! {
    static ref PROJECT_RULE_SET: RuleSet = build_rule_set();
    static ref PROJECT_RULES: ResolvedRules = {
        let mut resolved = ResolvedRules::default();
        resolved.overlay_rules(&presets::conventional().rules);
        resolved.overlay_rules(&PROJECT_RULE_SET.rules);
        resolved
    };
}

fn build_rule_set() -> RuleSet {
    let mut set = RuleSet::new().extend(CONVENTIONAL);

    set.rules.insert(
        "type-enum".into(),
        RuleSpec::new(Severity::Error, Applicability::Always)
            .with_constraint(Constraint::list(RELEASE_TYPES)),
    );
    set.rules.insert(
        "subject-case".into(),
        RuleSpec::new(Severity::Error, Applicability::Always)
            .with_constraint(Constraint::text("lower-case")),
    );
    set.rules.insert(
        "subject-empty".into(),
        RuleSpec::new(Severity::Error, Applicability::Never),
    );
    set.rules.insert(
        "type-empty".into(),
        RuleSpec::new(Severity::Error, Applicability::Never),
    );

    set
}

/// The declared project rule set (base reference plus local overrides).
pub fn project_rule_set() -> &'static RuleSet {
    &PROJECT_RULE_SET
}

/// The project rule set merged over its base.
pub fn project_rules() -> &'static ResolvedRules {
    &PROJECT_RULES
}
