// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Rules are declared as data ([`RuleSet`]), merged over the base rule sets
//! they extend ([`ResolvedRules`]) and evaluated by the [`RuleEngine`].

mod builtin;
pub mod case;
mod engine;
mod ignore;
pub mod presets;
mod project;
mod ruleset;
mod spec;
mod validator;

pub use builtin::{builtin_rules, find_builtin, BuiltinRule, Rule, RuleOutcome, ValueKind};
pub use engine::RuleEngine;
pub use ignore::IgnoreMatcher;
pub use project::{project_rule_set, project_rules, RELEASE_TYPES};
pub use ruleset::{ResolvedRules, RuleSet};
pub use spec::{Applicability, Constraint, RuleSpec, Severity};
pub use validator::{ValidationIssue, ValidationResult};
