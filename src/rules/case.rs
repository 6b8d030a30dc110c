// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Named case predicates (`lower-case`, `kebab-case`, ...).
//!
//! A value is in a given case when converting it to that case leaves it
//! unchanged. Empty values are in every case.

use std::fmt;
use std::str::FromStr;

/// A named text case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Lower,
    Upper,
    Camel,
    Kebab,
    Snake,
    Pascal,
    Sentence,
    Start,
}

impl Case {
    /// Get the canonical name of the case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Case::Lower => "lower-case",
            Case::Upper => "upper-case",
            Case::Camel => "camel-case",
            Case::Kebab => "kebab-case",
            Case::Snake => "snake-case",
            Case::Pascal => "pascal-case",
            Case::Sentence => "sentence-case",
            Case::Start => "start-case",
        }
    }

    /// Convert `input` to this case.
    pub fn convert(&self, input: &str) -> String {
        match self {
            Case::Lower => input.to_lowercase(),
            Case::Upper => input.to_uppercase(),
            Case::Camel => {
                let words = split_words(input);
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            Case::Kebab => join_lower(input, "-"),
            Case::Snake => join_lower(input, "_"),
            Case::Pascal => split_words(input).iter().map(|w| capitalize(w)).collect(),
            Case::Sentence => upper_first(input),
            Case::Start => split_words(input)
                .iter()
                .map(|w| upper_first(w))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Whether `input` is already in this case.
    pub fn matches(&self, input: &str) -> bool {
        let input = input.trim();
        input.is_empty() || self.convert(input) == input
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(Case::Lower),
            "upper-case" | "uppercase" => Ok(Case::Upper),
            "camel-case" => Ok(Case::Camel),
            "kebab-case" => Ok(Case::Kebab),
            "snake-case" => Ok(Case::Snake),
            "pascal-case" => Ok(Case::Pascal),
            "sentence-case" | "sentencecase" => Ok(Case::Sentence),
            "start-case" => Ok(Case::Start),
            other => Err(format!("unknown case '{}'", other)),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Split on non-alphanumeric characters and lower-to-upper transitions.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn join_lower(input: &str, separator: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    upper_first(&word.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_names() {
        assert_eq!("lower-case".parse::<Case>(), Ok(Case::Lower));
        assert_eq!("lowercase".parse::<Case>(), Ok(Case::Lower));
        assert_eq!("sentence-case".parse::<Case>(), Ok(Case::Sentence));
        assert!("title-case".parse::<Case>().is_err());
    }

    #[test]
    fn test_lower_case() {
        assert!(Case::Lower.matches("add login page"));
        assert!(!Case::Lower.matches("add Login page"));
        assert!(!Case::Lower.matches("Broken Build"));
        assert!(Case::Lower.matches("bump to 1.2.3"));
        assert!(Case::Lower.matches(""));
    }

    #[test]
    fn test_upper_case() {
        assert!(Case::Upper.matches("ADD LOGIN"));
        assert!(!Case::Upper.matches("Add login"));
    }

    #[test]
    fn test_sentence_case() {
        assert!(Case::Sentence.matches("Add login page"));
        assert!(!Case::Sentence.matches("add login page"));
    }

    #[test]
    fn test_start_case() {
        assert!(Case::Start.matches("Add Login Page"));
        assert!(!Case::Start.matches("Add login page"));
    }

    #[test]
    fn test_pascal_and_camel_case() {
        assert!(Case::Pascal.matches("AddLoginPage"));
        assert!(!Case::Pascal.matches("addLoginPage"));
        assert!(Case::Camel.matches("addLoginPage"));
        assert!(!Case::Camel.matches("AddLoginPage"));
    }

    #[test]
    fn test_kebab_and_snake_case() {
        assert!(Case::Kebab.matches("add-login-page"));
        assert!(!Case::Kebab.matches("add login page"));
        assert!(Case::Snake.matches("add_login_page"));
        assert!(!Case::Snake.matches("addLoginPage"));
    }
}
