// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule specification types.
//!
//! A rule is configured with a commitlint-style tuple:
//! `[severity, applicability, constraint]`, e.g. `[2, "always", ["feat", "fix"]]`.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How strictly a rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    /// The rule is not evaluated.
    Disabled,
    /// A failure is reported but does not fail the lint.
    Warning,
    /// A failure fails the lint.
    Error,
}

impl Severity {
    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Disabled => "disabled",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, String> {
        match level {
            0 => Ok(Severity::Disabled),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity {} (expected 0, 1 or 2)",
                other
            )),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Disabled => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Get the string representation of the applicability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }

    /// Whether the rule passes given whether its condition holds.
    pub fn accepts(&self, holds: bool) -> bool {
        match self {
            Applicability::Always => holds,
            Applicability::Never => !holds,
        }
    }

    /// Negation word used in failure messages ("" or "not ").
    pub(crate) fn negation(&self) -> &'static str {
        match self {
            Applicability::Always => "",
            Applicability::Never => "not ",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value a rule is checked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Constraint {
    /// A numeric limit, e.g. a maximum length.
    Number(u64),
    /// A named format predicate (`"lower-case"`) or a literal (`"."`).
    Text(String),
    /// A set of allowed values or case names.
    List(Vec<String>),
}

impl Constraint {
    /// Build a list constraint from string slices.
    pub fn list(values: &[&str]) -> Self {
        Constraint::List(values.iter().map(|v| v.to_string()).collect())
    }

    /// Build a text constraint.
    pub fn text(value: impl Into<String>) -> Self {
        Constraint::Text(value.into())
    }

    /// Values of a text or list constraint, as a list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Constraint::Text(value) => vec![value.as_str()],
            Constraint::List(values) => values.iter().map(String::as_str).collect(),
            Constraint::Number(_) => Vec::new(),
        }
    }

    /// Short name of the constraint shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Number(_) => "number",
            Constraint::Text(_) => "string",
            Constraint::List(_) => "list",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Number(n) => write!(f, "{}", n),
            Constraint::Text(value) => write!(f, "{}", value),
            Constraint::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// Configuration of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleSpec {
    pub severity: Severity,
    pub applicability: Applicability,
    pub constraint: Option<Constraint>,
}

impl RuleSpec {
    /// Create a rule spec without a constraint.
    pub fn new(severity: Severity, applicability: Applicability) -> Self {
        Self {
            severity,
            applicability,
            constraint: None,
        }
    }

    /// Set the constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// A disabled rule.
    pub fn disabled() -> Self {
        Self::new(Severity::Disabled, Applicability::Always)
    }

    /// Whether the rule is evaluated at all.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Disabled
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}", u8::from(self.severity), self.applicability)?;
        if let Some(ref constraint) = self.constraint {
            write!(f, ", {}", constraint)?;
        }
        write!(f, "]")
    }
}

impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.constraint.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.applicability)?;
        if let Some(ref constraint) = self.constraint {
            seq.serialize_element(constraint)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RuleSpecVisitor)
    }
}

struct RuleSpecVisitor;

impl<'de> Visitor<'de> for RuleSpecVisitor {
    type Value = RuleSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of [severity, applicability?, value?]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let severity: Severity = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let applicability: Applicability = seq.next_element()?.unwrap_or_default();
        let constraint: Option<Constraint> = seq.next_element()?;

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }

        Ok(RuleSpec {
            severity,
            applicability,
            constraint,
        })
    }
}
