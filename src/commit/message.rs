// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for parsing a conventional commit header.
    static ref HEADER_REGEX: Regex =
        Regex::new(r"^(?P<type>\w*)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?:[ \t]*(?P<subject>.*)$")
            .unwrap();

    /// Regex for the first line of a footer paragraph (git trailer style).
    static ref FOOTER_TOKEN_REGEX: Regex =
        Regex::new(r"^(?:BREAKING[ -]CHANGE|[\w-]+)(?::[ \t]|[ \t]#)").unwrap();
}

/// A parsed commit message.
///
/// Parsing is lenient: a header that does not follow the conventional format
/// yields an empty type and subject, which the rules then report on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitMessage {
    /// The message with comment lines removed.
    pub raw: String,
    /// First line of the message.
    pub header: String,
    /// Commit type, as written (case preserved).
    pub commit_type: String,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer (trailers, breaking change notes).
    pub footer: Option<String>,
    /// Line number (1-based) where the body starts.
    pub body_line: Option<usize>,
    /// Line number (1-based) where the footer starts.
    pub footer_line: Option<usize>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
}

impl CommitMessage {
    /// Create a commit message from a type and subject.
    pub fn new(commit_type: impl Into<String>, subject: impl Into<String>) -> Self {
        let mut message = Self {
            commit_type: commit_type.into(),
            subject: subject.into(),
            ..Self::default()
        };
        message.header = message.format_header();
        message.raw = message.header.clone();
        message
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self.refresh();
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self.body_line = self.body.as_ref().map(|_| 3);
        self.refresh();
        self
    }

    /// Set the breaking flag.
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.is_breaking = breaking;
        self.refresh();
        self
    }

    fn refresh(&mut self) {
        self.header = self.format_header();
        self.raw = self.format();
    }

    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Self {
        let raw = strip_comments(message);
        let mut lines = raw.lines();
        let header = lines.next().unwrap_or("").to_string();

        let (commit_type, scope, breaking_marker, subject) = match HEADER_REGEX.captures(&header) {
            Some(captures) => (
                captures
                    .name("type")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                captures
                    .name("scope")
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty()),
                captures.name("breaking").is_some(),
                captures
                    .name("subject")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            ),
            None => (String::new(), None, false, String::new()),
        };

        let rest: Vec<&str> = lines.collect();
        let sections = split_body_and_footer(&rest);
        let (body, body_line) = sections.body.unzip();
        let (footer, footer_line) = sections.footer.unzip();

        let is_breaking = breaking_marker
            || footer
                .as_ref()
                .map(|f| f.contains("BREAKING CHANGE") || f.contains("BREAKING-CHANGE"))
                .unwrap_or(false);

        Self {
            raw,
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            body_line,
            footer_line,
            is_breaking,
        }
    }

    /// Whether the message has no content at all.
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Lines after the header, as written.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines().skip(1)
    }

    /// Format the commit message as a string.
    pub fn format(&self) -> String {
        let mut result = self.format_header();

        if let Some(ref body) = self.body {
            result.push_str("\n\n");
            result.push_str(body);
        }

        if let Some(ref footer) = self.footer {
            result.push_str("\n\n");
            result.push_str(footer);
        }

        result
    }

    fn format_header(&self) -> String {
        let mut result = self.commit_type.clone();

        if let Some(ref scope) = self.scope {
            result.push('(');
            result.push_str(scope);
            result.push(')');
        }

        if self.is_breaking {
            result.push('!');
        }

        result.push_str(": ");
        result.push_str(&self.subject);

        result
    }
}

/// Drop git comment lines and trailing blank lines.
///
/// Trailing whitespace on the remaining lines is kept so rules can see it.
fn strip_comments(message: &str) -> String {
    let mut lines: Vec<&str> = message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Body and footer text, each with the line number it starts on.
struct Sections {
    body: Option<(String, usize)>,
    footer: Option<(String, usize)>,
}

/// A run of non-blank lines and the index of its first line.
struct Paragraph<'a> {
    start: usize,
    lines: Vec<&'a str>,
}

/// Split the lines after the header into body and footer.
fn split_body_and_footer(rest: &[&str]) -> Sections {
    // Leading blanks dropped.
    let mut paragraphs: Vec<Paragraph> = Vec::new();
    let mut current: Option<Paragraph> = None;
    for (index, &line) in rest.iter().enumerate() {
        if line.trim().is_empty() {
            paragraphs.extend(current.take());
        } else {
            current
                .get_or_insert_with(|| Paragraph {
                    start: index,
                    lines: Vec::new(),
                })
                .lines
                .push(line);
        }
    }
    paragraphs.extend(current);

    let footer_start = paragraphs
        .iter()
        .position(|p| FOOTER_TOKEN_REGEX.is_match(p.lines[0]));

    let (body_paragraphs, footer_paragraphs) = match footer_start {
        Some(i) => paragraphs.split_at(i),
        None => (&paragraphs[..], &[][..]),
    };

    // Line numbers are 1-based and count the header.
    let join = |ps: &[Paragraph]| -> Option<(String, usize)> {
        let first = ps.first()?;
        let text = ps
            .iter()
            .map(|p| p.lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        Some((text, first.start + 2))
    };

    Sections {
        body: join(body_paragraphs),
        footer: join(footer_paragraphs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message_new() {
        let msg = CommitMessage::new("feat", "add new feature");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.subject, "add new feature");
        assert_eq!(msg.header, "feat: add new feature");
        assert!(msg.scope.is_none());
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_commit_message_builder() {
        let msg = CommitMessage::new("fix", "fix bug")
            .with_scope("core")
            .with_body("This fixes the bug")
            .with_breaking(true);

        assert_eq!(msg.scope, Some("core".to_string()));
        assert_eq!(msg.header, "fix(core)!: fix bug");
        assert_eq!(msg.raw, "fix(core)!: fix bug\n\nThis fixes the bug");
    }

    #[test]
    fn test_parse_simple() {
        let msg = CommitMessage::parse("feat: add login page");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.subject, "add login page");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_keeps_type_case() {
        let msg = CommitMessage::parse("Fix: Broken Build");
        assert_eq!(msg.commit_type, "Fix");
        assert_eq!(msg.subject, "Broken Build");
    }

    #[test]
    fn test_parse_scope_and_breaking() {
        let msg = CommitMessage::parse("feat(api)!: drop v1 endpoints");
        assert_eq!(msg.scope, Some("api".to_string()));
        assert!(msg.is_breaking);
        assert_eq!(msg.subject, "drop v1 endpoints");
    }

    #[test]
    fn test_parse_empty_subject() {
        let msg = CommitMessage::parse("feat:");
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.subject, "");
    }

    #[test]
    fn test_parse_empty_type() {
        let msg = CommitMessage::parse(": add something");
        assert_eq!(msg.commit_type, "");
        assert_eq!(msg.subject, "add something");
    }

    #[test]
    fn test_parse_not_conventional() {
        let msg = CommitMessage::parse("just some words");
        assert_eq!(msg.header, "just some words");
        assert_eq!(msg.commit_type, "");
        assert_eq!(msg.subject, "");
    }

    #[test]
    fn test_parse_body_and_footer() {
        let msg = CommitMessage::parse(
            "fix(parser): handle tabs\n\nTabs were treated as spaces.\nNow they are not.\n\nRefs #42\nReviewed-by: Alice",
        );
        assert_eq!(
            msg.body,
            Some("Tabs were treated as spaces.\nNow they are not.".to_string())
        );
        assert_eq!(msg.footer, Some("Refs #42\nReviewed-by: Alice".to_string()));
        assert_eq!(msg.body_line, Some(3));
        assert_eq!(msg.footer_line, Some(6));
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_footer_line_after_repeated_text() {
        let msg = CommitMessage::parse("fix: x\n\nSee the issue\nRefs #1\n\nRefs #1");
        assert_eq!(msg.body, Some("See the issue\nRefs #1".to_string()));
        assert_eq!(msg.footer, Some("Refs #1".to_string()));
        assert_eq!(msg.footer_line, Some(6));
    }

    #[test]
    fn test_parse_breaking_footer() {
        let msg = CommitMessage::parse("feat: new config\n\nBREAKING CHANGE: old keys removed");
        assert!(msg.body.is_none());
        assert_eq!(
            msg.footer,
            Some("BREAKING CHANGE: old keys removed".to_string())
        );
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_strips_comments() {
        let msg = CommitMessage::parse(
            "docs: update readme\n# Please enter the commit message\n# Lines starting with '#' are ignored\n",
        );
        assert_eq!(msg.raw, "docs: update readme");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_keeps_header_whitespace() {
        let msg = CommitMessage::parse("feat: add login page \n\n");
        assert_eq!(msg.header, "feat: add login page ");
        assert_eq!(msg.raw, "feat: add login page ");
    }

    #[test]
    fn test_format_round_trip() {
        let text = "feat(cli): add flag\n\nLonger description";
        assert_eq!(CommitMessage::parse(text).format(), text);
    }
}
