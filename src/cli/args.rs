// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lintcommit - Conventional commit linter
///
/// Checks commit messages against a declarative rule set.
#[derive(Parser, Debug)]
#[command(name = "lintcommit")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Lint commit messages against conventional commit rules", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to lint if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Treat warnings as errors
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LINTCOMMIT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a commit message (default command)
    Lint(LintArgs),

    /// Lint commits from git history
    Check(CheckArgs),

    /// Print the resolved rule table
    Rules(RulesArgs),

    /// Write a lintcommit.toml with the project rules
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Message to lint (reads stdin when omitted)
    pub message: Option<String>,

    /// Read the message from a file (defaults to .git/COMMIT_EDITMSG)
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 0..=1,
        conflicts_with = "message"
    )]
    pub edit: Option<Option<PathBuf>>,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Commit or range to check
    #[arg(default_value = "HEAD")]
    pub target: String,

    /// Treat the target as a range
    #[arg(long)]
    pub range: bool,
}

/// Arguments for the rules command.
#[derive(Parser, Debug, Default, Clone)]
pub struct RulesArgs {
    /// Serialization of the rule table
    #[arg(long, value_enum, default_value_t = RulesOutput::Toml)]
    pub output: RulesOutput,
}

/// Serialization formats for the rules command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RulesOutput {
    /// TOML, as accepted in the `[rules]` table
    #[default]
    Toml,
    /// JSON
    Json,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Where to write the configuration
    #[arg(long, default_value = "lintcommit.toml")]
    pub path: PathBuf,
}

impl Cli {
    /// Get the effective command, defaulting to Lint if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Lint(LintArgs::default()))
    }
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            target: "HEAD".to_string(),
            range: false,
        }
    }
}
