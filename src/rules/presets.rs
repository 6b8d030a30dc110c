// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in base rule sets that can be named in `extends`.

use super::ruleset::RuleSet;
use super::spec::{Applicability, Constraint, RuleSpec, Severity};

/// Name of the conventional commits preset.
pub const CONVENTIONAL: &str = "@commitlint/config-conventional";

/// Short alias accepted for [`CONVENTIONAL`].
const CONVENTIONAL_ALIAS: &str = "conventional";

/// Look up a built-in preset by name.
pub fn find_preset(name: &str) -> Option<RuleSet> {
    match name {
        CONVENTIONAL | CONVENTIONAL_ALIAS => Some(conventional()),
        _ => None,
    }
}

fn rule(severity: Severity, applicability: Applicability) -> RuleSpec {
    RuleSpec::new(severity, applicability)
}

/// The conventional commits rule set.
pub fn conventional() -> RuleSet {
    use Applicability::{Always, Never};
    use Severity::{Error, Warning};

    let mut set = RuleSet::new();
    let rules = &mut set.rules;

    rules.insert("body-leading-blank".into(), rule(Warning, Always));
    rules.insert(
        "body-max-line-length".into(),
        rule(Error, Always).with_constraint(Constraint::Number(100)),
    );
    rules.insert("footer-leading-blank".into(), rule(Warning, Always));
    rules.insert(
        "footer-max-line-length".into(),
        rule(Error, Always).with_constraint(Constraint::Number(100)),
    );
    rules.insert(
        "header-max-length".into(),
        rule(Error, Always).with_constraint(Constraint::Number(100)),
    );
    rules.insert("header-trim".into(), rule(Error, Always));
    rules.insert(
        "subject-case".into(),
        rule(Error, Never).with_constraint(Constraint::list(&[
            "sentence-case",
            "start-case",
            "pascal-case",
            "upper-case",
        ])),
    );
    rules.insert("subject-empty".into(), rule(Error, Never));
    rules.insert(
        "subject-full-stop".into(),
        rule(Error, Never).with_constraint(Constraint::text(".")),
    );
    rules.insert(
        "type-case".into(),
        rule(Error, Always).with_constraint(Constraint::text("lower-case")),
    );
    rules.insert("type-empty".into(), rule(Error, Never));
    rules.insert(
        "type-enum".into(),
        rule(Error, Always).with_constraint(Constraint::list(&[
            "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style",
            "test",
        ])),
    );

    set
}
