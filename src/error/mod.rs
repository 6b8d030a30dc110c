// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for lintcommit.
//!
//! Rule failures are not errors: they are reported through
//! [`ValidationResult`](crate::rules::ValidationResult). The types here cover
//! everything that stops the linter from producing a result at all.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for lintcommit operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Commit message errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Duplicate rule name: '{name}'")]
    DuplicateRule { name: String },

    #[error("Unknown rule: '{name}'")]
    UnknownRule { name: String },

    #[error("Unknown preset in extends: '{name}'")]
    UnknownPreset { name: String },

    #[error("Cyclic extends detected at {path}")]
    ExtendsCycle { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Failed to walk commits: {message}")]
    WalkFailed { message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Validation-related errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{count} commit(s) failed validation")]
    Failed { count: usize },

    #[error("Warnings found in strict mode: {count} issue(s)")]
    StrictWarnings { count: usize },
}

/// Commit message errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,

    #[error("Failed to read commit message from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },
}

/// Result type alias for lintcommit operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_duplicate_rule_display() {
        let err = ConfigError::DuplicateRule {
            name: "type-enum".to_string(),
        };
        assert!(err.to_string().contains("type-enum"));
    }

    #[test]
    fn test_lint_error_from_config_error() {
        let config_err = ConfigError::UnknownPreset {
            name: "@acme/config".to_string(),
        };
        let err: LintError = config_err.into();
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(err.to_string().contains("@acme/config"));
    }

    #[test]
    fn test_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk on fire",
        ));
        let err = io.context("reading stdin").unwrap_err();
        assert_eq!(err.to_string(), "reading stdin: disk on fire");
    }
}
