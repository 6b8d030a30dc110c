// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! lintcommit - Conventional commit linter
//!
//! Commit message rules are plain data: a [`RuleSet`](rules::RuleSet) names
//! the base rule sets it extends and overrides rules by name. The resolved
//! table is evaluated by a [`RuleEngine`](rules::RuleEngine) against parsed
//! messages.
//!
//! # Features
//!
//! - **Project Rule Set**: the release pipeline's commit types, lower-case
//!   subjects and non-empty type and subject, on top of the conventional preset
//! - **Lenient Parsing**: malformed headers are reported by rules, not rejected
//! - **Configurable**: `lintcommit.toml` with `extends`, overrides and ignores
//! - **Git Integration**: lint single commits or whole ranges
//!
//! # Example
//!
//! ```no_run
//! use lintcommit::rules::RuleEngine;
//!
//! let engine = RuleEngine::project().unwrap();
//!
//! let result = engine.validate_str("feat: add login page");
//! assert!(result.is_valid());
//!
//! let result = engine.validate_str("Fix: Broken Build");
//! assert!(result.issue("type-enum").is_some());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod rules;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{LintError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of lintcommit.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
