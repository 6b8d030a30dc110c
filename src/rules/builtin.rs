// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Each rule tests a condition on the parsed message. With `always` the
//! condition must hold, with `never` it must not. Rules about a field that is
//! absent pass, except the `*-empty` rules whose condition is the absence.

use crate::commit::CommitMessage;

use super::case::Case;
use super::spec::{Applicability, Constraint};

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Whether the rule passed.
    pub valid: bool,
    /// Description of the requirement, used when the rule fails.
    pub message: String,
    /// Optional hint for fixing a failure.
    pub suggestion: Option<String>,
}

impl RuleOutcome {
    fn new(valid: bool, message: impl Into<String>) -> Self {
        Self {
            valid,
            message: message.into(),
            suggestion: None,
        }
    }

    fn pass() -> Self {
        Self::new(true, "")
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Shape of the constraint a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No value; any given value is ignored.
    None,
    /// A number.
    Number,
    /// An optional string literal.
    Text,
    /// A list of strings (a single string is accepted as a one-element list).
    List,
    /// One or more case names.
    Cases,
}

impl ValueKind {
    /// Check a configured constraint against this shape.
    pub fn check(&self, constraint: Option<&Constraint>) -> Result<(), String> {
        match (self, constraint) {
            (ValueKind::None, _) | (ValueKind::Text, None) => Ok(()),
            (ValueKind::Number, Some(Constraint::Number(_))) => Ok(()),
            (ValueKind::Text, Some(Constraint::Text(_))) => Ok(()),
            (ValueKind::List, Some(Constraint::List(_) | Constraint::Text(_))) => Ok(()),
            (ValueKind::Cases, Some(c @ (Constraint::List(_) | Constraint::Text(_)))) => {
                for name in c.values() {
                    name.parse::<Case>()?;
                }
                Ok(())
            }
            (kind, Some(c)) => Err(format!("expected {}, found {}", kind.as_str(), c.kind())),
            (kind, None) => Err(format!("missing value, expected {}", kind.as_str())),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ValueKind::None => "no value",
            ValueKind::Number => "a number",
            ValueKind::Text => "a string",
            ValueKind::List => "a list of strings",
            ValueKind::Cases => "a case name or list of case names",
        }
    }
}

/// A validation rule that can be referenced by name from a rule set.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name.
    fn name(&self) -> &str;

    /// Shape of the constraint this rule expects.
    fn value_kind(&self) -> ValueKind;

    /// Evaluate the rule against a message.
    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        constraint: Option<&Constraint>,
    ) -> RuleOutcome;
}

type CheckFn = fn(&CommitMessage, Applicability, Option<&Constraint>) -> RuleOutcome;

/// A rule implemented by this crate.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    name: &'static str,
    value_kind: ValueKind,
    check: CheckFn,
}

impl Rule for BuiltinRule {
    fn name(&self) -> &str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    fn check(
        &self,
        message: &CommitMessage,
        when: Applicability,
        constraint: Option<&Constraint>,
    ) -> RuleOutcome {
        (self.check)(message, when, constraint)
    }
}

macro_rules! builtin {
    ($name:literal, $kind:ident, $check:path) => {
        BuiltinRule {
            name: $name,
            value_kind: ValueKind::$kind,
            check: $check,
        }
    };
}

static BUILTIN_RULES: &[BuiltinRule] = &[
    builtin!("type-enum", List, check_type_enum),
    builtin!("type-case", Cases, check_type_case),
    builtin!("type-empty", None, check_type_empty),
    builtin!("type-max-length", Number, check_type_max_length),
    builtin!("type-min-length", Number, check_type_min_length),
    builtin!("scope-enum", List, check_scope_enum),
    builtin!("scope-case", Cases, check_scope_case),
    builtin!("scope-empty", None, check_scope_empty),
    builtin!("subject-case", Cases, check_subject_case),
    builtin!("subject-empty", None, check_subject_empty),
    builtin!("subject-full-stop", Text, check_subject_full_stop),
    builtin!("subject-max-length", Number, check_subject_max_length),
    builtin!("subject-min-length", Number, check_subject_min_length),
    builtin!("subject-exclamation-mark", None, check_subject_exclamation_mark),
    builtin!("header-max-length", Number, check_header_max_length),
    builtin!("header-min-length", Number, check_header_min_length),
    builtin!("header-trim", None, check_header_trim),
    builtin!("header-full-stop", Text, check_header_full_stop),
    builtin!("body-leading-blank", None, check_body_leading_blank),
    builtin!("body-empty", None, check_body_empty),
    builtin!("body-max-length", Number, check_body_max_length),
    builtin!("body-max-line-length", Number, check_body_max_line_length),
    builtin!("footer-leading-blank", None, check_footer_leading_blank),
    builtin!("footer-empty", None, check_footer_empty),
    builtin!("footer-max-line-length", Number, check_footer_max_line_length),
];

/// All built-in rules.
pub fn builtin_rules() -> &'static [BuiltinRule] {
    BUILTIN_RULES
}

/// Look up a built-in rule by name.
pub fn find_builtin(name: &str) -> Option<&'static BuiltinRule> {
    BUILTIN_RULES.iter().find(|rule| rule.name == name)
}

fn number(constraint: Option<&Constraint>) -> usize {
    match constraint {
        Some(Constraint::Number(n)) => usize::try_from(*n).unwrap_or(usize::MAX),
        _ => usize::MAX,
    }
}

fn values(constraint: Option<&Constraint>) -> Vec<&str> {
    constraint.map(Constraint::values).unwrap_or_default()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Shared implementation of the `*-case` rules.
fn check_case(
    field: &str,
    value: &str,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    if value.is_empty() {
        return RuleOutcome::pass();
    }
    let names = values(constraint);
    let holds = names
        .iter()
        .filter_map(|name| name.parse::<Case>().ok())
        .any(|case| case.matches(value));

    RuleOutcome::new(
        when.accepts(holds),
        format!("{} must {}be {}", field, when.negation(), names.join(" or ")),
    )
}

/// Shared implementation of the `*-empty` rules.
fn check_empty(field: &str, is_empty: bool, when: Applicability) -> RuleOutcome {
    let message = match when {
        Applicability::Always => format!("{} must be empty", field),
        Applicability::Never => format!("{} may not be empty", field),
    };
    RuleOutcome::new(when.accepts(is_empty), message)
}

fn check_max_length(field: &str, value: &str, constraint: Option<&Constraint>) -> RuleOutcome {
    let max = number(constraint);
    let len = char_len(value);
    RuleOutcome::new(
        len <= max,
        format!(
            "{} must not be longer than {} characters, current length is {}",
            field, max, len
        ),
    )
}

fn check_min_length(field: &str, value: &str, constraint: Option<&Constraint>) -> RuleOutcome {
    if value.is_empty() {
        return RuleOutcome::pass();
    }
    let min = number(constraint);
    let len = char_len(value);
    RuleOutcome::new(
        len >= min,
        format!(
            "{} must not be shorter than {} characters, current length is {}",
            field, min, len
        ),
    )
}

fn check_max_line_length(
    field: &str,
    value: Option<&str>,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    let Some(value) = value else {
        return RuleOutcome::pass();
    };
    let max = number(constraint);
    let longest = value.lines().map(char_len).max().unwrap_or(0);
    RuleOutcome::new(
        longest <= max,
        format!("{}'s lines must not be longer than {} characters", field, max),
    )
}

fn check_full_stop(
    field: &str,
    value: &str,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    if value.is_empty() {
        return RuleOutcome::pass();
    }
    let stop = match constraint {
        Some(Constraint::Text(stop)) => stop.as_str(),
        _ => ".",
    };
    RuleOutcome::new(
        when.accepts(value.ends_with(stop)),
        format!("{} may {}end with full stop", field, when.negation()),
    )
    .with_suggestion(format!("Remove the trailing '{}'", stop))
}

fn check_type_enum(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    if message.commit_type.is_empty() {
        return RuleOutcome::pass();
    }
    let allowed = values(constraint);
    let holds = allowed.iter().any(|t| *t == message.commit_type);

    RuleOutcome::new(
        when.accepts(holds),
        format!(
            "type must {}be one of [{}]",
            when.negation(),
            allowed.join(", ")
        ),
    )
    .with_suggestion(format!("Use one of: {}", allowed.join(", ")))
}

fn check_type_case(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_case("type", &message.commit_type, when, constraint)
}

fn check_type_empty(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    check_empty("type", message.commit_type.is_empty(), when)
        .with_suggestion("Start the header with a type: type(scope): subject")
}

fn check_type_max_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_max_length("type", &message.commit_type, constraint)
}

fn check_type_min_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_min_length("type", &message.commit_type, constraint)
}

/// Scopes may list several values separated by `/`, `\` or `,`.
fn scope_parts(scope: &str) -> Vec<&str> {
    scope
        .split(['/', '\\', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn check_scope_enum(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    let Some(ref scope) = message.scope else {
        return RuleOutcome::pass();
    };
    let allowed = values(constraint);
    if allowed.is_empty() {
        return RuleOutcome::pass();
    }
    let holds = scope_parts(scope).iter().all(|part| allowed.contains(part));

    RuleOutcome::new(
        when.accepts(holds),
        format!(
            "scope must {}be one of [{}]",
            when.negation(),
            allowed.join(", ")
        ),
    )
}

fn check_scope_case(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    let Some(ref scope) = message.scope else {
        return RuleOutcome::pass();
    };
    scope_parts(scope)
        .into_iter()
        .map(|part| check_case("scope", part, when, constraint))
        .find(|outcome| !outcome.valid)
        .unwrap_or_else(RuleOutcome::pass)
}

fn check_scope_empty(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    let is_empty = message.scope.as_deref().map(str::is_empty).unwrap_or(true);
    check_empty("scope", is_empty, when)
}

fn check_subject_case(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_case("subject", &message.subject, when, constraint)
}

fn check_subject_empty(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    check_empty("subject", message.subject.trim().is_empty(), when)
        .with_suggestion("Describe the change after the colon: type: subject")
}

fn check_subject_full_stop(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_full_stop("subject", &message.subject, when, constraint)
}

fn check_subject_max_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_max_length("subject", &message.subject, constraint)
}

fn check_subject_min_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_min_length("subject", &message.subject, constraint)
}

fn check_subject_exclamation_mark(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    let prefix = message.header.split(':').next().unwrap_or("");
    RuleOutcome::new(
        when.accepts(prefix.ends_with('!')),
        format!(
            "subject must {}have an exclamation mark before the colon to mark a breaking change",
            when.negation()
        ),
    )
}

fn check_header_max_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_max_length("header", &message.header, constraint)
}

fn check_header_min_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_min_length("header", &message.header, constraint)
}

fn check_header_trim(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    let trimmed = message.header.trim() == message.header;
    RuleOutcome::new(
        when.accepts(trimmed),
        format!(
            "header must {}be free of leading and trailing whitespace",
            when.negation()
        ),
    )
}

fn check_header_full_stop(
    message: &CommitMessage,
    when: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_full_stop("header", &message.header, when, constraint)
}

fn check_body_leading_blank(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    let Some(second) = message.body_lines().next() else {
        return RuleOutcome::pass();
    };
    RuleOutcome::new(
        when.accepts(second.trim().is_empty()),
        format!("body must {}have leading blank line", when.negation()),
    )
}

fn check_body_empty(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    check_empty("body", message.body.is_none(), when)
}

fn check_body_max_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    match message.body {
        Some(ref body) => check_max_length("body", body, constraint),
        None => RuleOutcome::pass(),
    }
}

fn check_body_max_line_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_max_line_length("body", message.body.as_deref(), constraint)
}

fn check_footer_leading_blank(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    let Some(footer_line) = message.footer_line else {
        return RuleOutcome::pass();
    };
    // footer_line is 1-based, so the line before it sits at footer_line - 2.
    let previous = message.raw.lines().nth(footer_line - 2).unwrap_or("");
    RuleOutcome::new(
        when.accepts(previous.trim().is_empty()),
        format!("footer must {}have leading blank line", when.negation()),
    )
}

fn check_footer_empty(
    message: &CommitMessage,
    when: Applicability,
    _: Option<&Constraint>,
) -> RuleOutcome {
    check_empty("footer", message.footer.is_none(), when)
}

fn check_footer_max_line_length(
    message: &CommitMessage,
    _: Applicability,
    constraint: Option<&Constraint>,
) -> RuleOutcome {
    check_max_line_length("footer", message.footer.as_deref(), constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Applicability::{Always, Never};

    fn max(n: u64) -> Option<Constraint> {
        Some(Constraint::Number(n))
    }

    fn run(
        name: &str,
        message: &str,
        when: Applicability,
        constraint: Option<Constraint>,
    ) -> RuleOutcome {
        let rule = find_builtin(name).unwrap();
        rule.check(&CommitMessage::parse(message), when, constraint.as_ref())
    }

    #[test]
    fn test_all_builtin_names_unique() {
        let mut names: Vec<&str> = builtin_rules().iter().map(|r| r.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), builtin_rules().len());
    }

    #[test]
    fn test_type_enum() {
        let types = Some(Constraint::list(&["feat", "fix"]));
        assert!(run("type-enum", "feat: x", Always, types.clone()).valid);

        let outcome = run("type-enum", "Fix: x", Always, types.clone());
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "type must be one of [feat, fix]");

        // Empty type is left to type-empty
        assert!(run("type-enum", ": x", Always, types).valid);
    }

    #[test]
    fn test_type_enum_never() {
        let outcome = run("type-enum", "wip: x", Never, Some(Constraint::list(&["wip"])));
        assert!(!outcome.valid);
        assert!(outcome.message.contains("must not be"));
    }

    #[test]
    fn test_type_empty() {
        assert!(!run("type-empty", ": x", Never, None).valid);
        assert!(run("type-empty", "feat: x", Never, None).valid);
        assert!(!run("type-empty", "feat: x", Always, None).valid);
    }

    #[test]
    fn test_subject_case() {
        let lower = Some(Constraint::text("lower-case"));
        assert!(run("subject-case", "feat: add login page", Always, lower.clone()).valid);
        assert!(!run("subject-case", "feat: add Login page", Always, lower.clone()).valid);
        assert!(run("subject-case", "feat:", Always, lower).valid);

        let forbidden = Some(Constraint::list(&["sentence-case", "upper-case"]));
        assert!(!run("subject-case", "feat: Add page", Never, forbidden.clone()).valid);
        assert!(run("subject-case", "feat: add page", Never, forbidden).valid);
    }

    #[test]
    fn test_subject_empty() {
        let outcome = run("subject-empty", "feat:", Never, None);
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "subject may not be empty");
        assert!(run("subject-empty", "feat: x", Never, None).valid);
    }

    #[test]
    fn test_subject_full_stop() {
        let stop = Some(Constraint::text("."));
        assert!(!run("subject-full-stop", "feat: add x.", Never, stop).valid);
        assert!(run("subject-full-stop", "feat: add x", Never, None).valid);
    }

    #[test]
    fn test_header_max_length() {
        let header = format!("feat: {}", "a".repeat(100));
        let outcome = run("header-max-length", &header, Always, max(100));
        assert!(!outcome.valid);
        assert!(outcome.message.contains("current length is 106"));
        assert!(run("header-max-length", "feat: x", Always, max(100)).valid);
    }

    #[test]
    fn test_header_trim() {
        assert!(!run("header-trim", "feat: x ", Always, None).valid);
        assert!(run("header-trim", "feat: x", Always, None).valid);
    }

    #[test]
    fn test_scope_rules() {
        let scopes = Some(Constraint::list(&["api", "cli"]));
        assert!(run("scope-enum", "feat(api/cli): x", Always, scopes.clone()).valid);
        assert!(!run("scope-enum", "feat(web): x", Always, scopes.clone()).valid);
        assert!(run("scope-enum", "feat: x", Always, scopes).valid);
        assert!(!run("scope-empty", "feat: x", Never, None).valid);
        let lower = Some(Constraint::text("lower-case"));
        assert!(!run("scope-case", "feat(Api): x", Always, lower).valid);
    }

    #[test]
    fn test_body_leading_blank() {
        assert!(run("body-leading-blank", "feat: x\n\nbody", Always, None).valid);
        assert!(!run("body-leading-blank", "feat: x\nbody", Always, None).valid);
        assert!(run("body-leading-blank", "feat: x", Always, None).valid);
    }

    #[test]
    fn test_footer_leading_blank() {
        assert!(run("footer-leading-blank", "feat: x\n\nbody\n\nRefs #1", Always, None).valid);
        assert!(!run("footer-leading-blank", "feat: x\nBREAKING CHANGE: gone", Always, None).valid);
        let repeated = "fix: x\n\nSee the issue\nRefs #1\n\nRefs #1";
        assert!(run("footer-leading-blank", repeated, Always, None).valid);
    }

    #[test]
    fn test_body_max_line_length() {
        let message = format!("feat: x\n\n{}", "b".repeat(120));
        assert!(!run("body-max-line-length", &message, Always, max(100)).valid);
        assert!(run("body-max-line-length", "feat: x", Always, max(100)).valid);
    }

    #[test]
    fn test_subject_exclamation_mark() {
        assert!(!run("subject-exclamation-mark", "feat!: x", Never, None).valid);
        assert!(run("subject-exclamation-mark", "feat: x!", Never, None).valid);
    }

    #[test]
    fn test_value_kind_check() {
        assert!(ValueKind::Number.check(Some(&Constraint::Number(3))).is_ok());
        assert!(ValueKind::Number.check(Some(&Constraint::text("3"))).is_err());
        assert!(ValueKind::Number.check(None).is_err());
        assert!(ValueKind::Cases.check(Some(&Constraint::text("lower-case"))).is_ok());
        let cases = Constraint::list(&["lower-case", "shouty"]);
        assert!(ValueKind::Cases.check(Some(&cases)).is_err());
        assert!(ValueKind::Text.check(None).is_ok());
        assert!(ValueKind::None.check(Some(&Constraint::Number(1))).is_ok());
    }
}
