// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use console::{style, Style};

use super::spec::Severity;

/// A single failed rule.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Name of the rule that failed.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Configured severity of the rule.
    pub severity: Severity,
    /// Line number where the issue was found.
    pub line: Option<usize>,
}

impl ValidationIssue {
    /// Whether this issue fails the lint.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if self.is_error() {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let mut output = format!(
            "{} {} [{}]",
            prefix,
            self.message,
            code_style.apply_to(&self.code)
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.code,
            "severity": self.severity.as_str(),
            "level": u8::from(self.severity),
            "message": self.message,
            "suggestion": self.suggestion,
            "line": self.line,
        })
    }
}

/// Result of validating a commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The original message.
    pub message: String,
    /// Commit SHA if validating an existing commit.
    pub commit_sha: Option<String>,
    /// Whether the message matched an ignore pattern and was not checked.
    pub ignored: bool,
    /// Names of the rules that passed.
    pub passed: Vec<String>,
    /// Validation errors.
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings.
    pub warnings: Vec<ValidationIssue>,
    /// Help link printed after failures.
    pub help_url: Option<String>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            commit_sha: None,
            ignored: false,
            passed: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            help_url: None,
        }
    }

    /// Record a failed rule, sorting it by severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Disabled => {}
        }
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether the named rule ran and passed.
    pub fn rule_passed(&self, rule: &str) -> bool {
        self.passed.iter().any(|r| r == rule)
    }

    /// Find the issue reported by the named rule, if any.
    pub fn issue(&self, rule: &str) -> Option<&ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .find(|issue| issue.code == rule)
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    /// Print in text format.
    fn print_text(&self) {
        let first_line = self.message.lines().next().unwrap_or("");
        let status = if self.ignored {
            style("-").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                println!("{} {} {}", status, style(short_sha).cyan(), first_line);
            }
            None => println!("{} {}", status, first_line),
        }

        // Print errors
        for error in &self.errors {
            println!("  {}", error.format());
        }

        // Print warnings
        for warning in &self.warnings {
            println!("  {}", warning.format());
        }

        if self.issue_count() > 0 {
            println!("  {}", style(self.summary()).dim());
            if let Some(ref url) = self.help_url {
                println!("  {} Get help: {}", style("ⓘ").blue(), url);
            }
        }
    }

    /// Print several results; JSON output becomes one array.
    pub fn print_all(results: &[ValidationResult], format: Option<OutputFormat>) {
        match (format, results) {
            (Some(OutputFormat::Json), [_, _, ..]) => {
                let json: Vec<_> = results.iter().map(ValidationResult::to_json).collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
            _ => results.iter().for_each(|result| result.print(format)),
        }
    }

    /// Print in JSON format.
    fn print_json(&self) {
        println!(
            "{}",
            serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
        );
    }

    /// The result as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "commit": self.commit_sha,
            "message": self.message,
            "passed": self.passed,
            "errors": self.errors.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            "Ignored".to_string()
        } else if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(code: &str, severity: Severity) -> ValidationIssue {
        ValidationIssue {
            code: code.to_string(),
            message: format!("{} failed", code),
            suggestion: None,
            severity,
            line: Some(1),
        }
    }

    #[test]
    fn test_validation_result_valid() {
        let result = ValidationResult::new("feat: test".to_string());
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_push_sorts_by_severity() {
        let mut result = ValidationResult::new("test".to_string());
        result.push(issue("type-enum", Severity::Error));
        result.push(issue("body-leading-blank", Severity::Warning));
        result.push(issue("ignored", Severity::Disabled));

        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.issue("type-enum").unwrap().severity, Severity::Error);
        assert!(result.issue("ignored").is_none());
    }

    #[test]
    fn test_validation_issue_format() {
        let mut issue = issue("subject-case", Severity::Error);
        issue.suggestion = Some("Fix it".to_string());

        let formatted = issue.format();
        assert!(formatted.contains("subject-case"));
        assert!(formatted.contains("subject-case failed"));
        assert!(formatted.contains("Fix it"));
    }

    #[test]
    fn test_issue_json() {
        let json = issue("type-empty", Severity::Warning).to_json();
        assert_eq!(json["rule"], "type-empty");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["level"], 1);
    }

    #[test]
    fn test_summary() {
        let mut result = ValidationResult::new("test".to_string());
        assert!(result.summary().contains("Valid"));

        result.push(issue("warn", Severity::Warning));
        assert!(result.summary().contains("1 warnings"));

        result.push(issue("err", Severity::Error));
        assert!(result.summary().contains("Invalid"));

        result.ignored = true;
        assert_eq!(result.summary(), "Ignored");
    }

    #[test]
    fn test_result_json() {
        let mut result = ValidationResult::new("Fix: x".to_string());
        result.commit_sha = Some("abc1234".to_string());
        result.push(issue("type-enum", Severity::Error));

        let json = result.to_json();
        assert_eq!(json["valid"], false);
        assert_eq!(json["commit"], "abc1234");
        assert_eq!(json["errors"][0]["rule"], "type-enum");
    }
}
