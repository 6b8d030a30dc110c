// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::commit::CommitMessage;
use crate::config::LintConfig;
use crate::error::{CommitError, ConfigError, LintError, Result, ResultExt, ValidationError};
use crate::rules::{RuleEngine, ValidationResult};
use std::io::Read;
use std::path::PathBuf;

use super::args::{CheckArgs, Cli, Commands, InitArgs, LintArgs, RulesArgs, RulesOutput};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Configuration is only loaded by commands that lint, so a broken file
    // can still be replaced with `init --force`.
    match cli.effective_command() {
        Commands::Lint(args) => run_lint(&cli, &load_config(&cli)?, args),
        Commands::Check(args) => run_check(&cli, &load_config(&cli)?, args),
        Commands::Rules(args) => run_rules(&load_config(&cli)?, args),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Load the configuration named by `--config`, or search for one.
fn load_config(cli: &Cli) -> Result<LintConfig> {
    let config = match cli.config {
        Some(ref config_path) => LintConfig::load_from(config_path)?,
        None => LintConfig::load()?,
    };

    if !config.ui.color {
        console::set_colors_enabled(false);
    }

    Ok(config)
}

/// Read the message to lint from the argument, a file or stdin.
fn read_message(args: &LintArgs) -> Result<String> {
    if let Some(ref message) = args.message {
        return Ok(message.clone());
    }

    if let Some(ref edit) = args.edit {
        let path = match edit {
            Some(path) => path.clone(),
            None => crate::git::open_repo()?.git_dir().join("COMMIT_EDITMSG"),
        };
        tracing::debug!("Reading commit message from {:?}", path);
        return std::fs::read_to_string(&path).map_err(|e| {
            LintError::Commit(CommitError::ReadFailed {
                path,
                message: e.to_string(),
            })
        });
    }

    tracing::debug!("Reading commit message from stdin");
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

/// Turn lint results into the process outcome.
fn conclude(cli: &Cli, results: &[ValidationResult]) -> Result<()> {
    let mut failed = 0;
    let mut warnings = 0;

    for result in results {
        if !result.is_valid() {
            failed += 1;
        }
        warnings += result.warnings.len();
    }
    ValidationResult::print_all(results, cli.format);

    if failed > 0 {
        Err(LintError::Validation(ValidationError::Failed { count: failed }))
    } else if cli.strict && warnings > 0 {
        Err(LintError::Validation(ValidationError::StrictWarnings {
            count: warnings,
        }))
    } else {
        Ok(())
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: &LintConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let input = read_message(&args)?;
    let message = CommitMessage::parse(&input);
    if message.is_empty() {
        return Err(LintError::Commit(CommitError::EmptyMessage));
    }

    let engine = RuleEngine::from_config(config)?;
    let result = engine.validate(&message);
    conclude(cli, &[result])
}

/// Run the check command.
fn run_check(cli: &Cli, config: &LintConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = RuleEngine::from_config(config)?;

    let results = if args.range || args.target.contains("..") {
        engine.check_range(&args.target)?
    } else {
        vec![engine.check_commit(&args.target)?]
    };

    conclude(cli, &results)
}

/// Run the rules command.
fn run_rules(config: &LintConfig, args: RulesArgs) -> Result<()> {
    let rules = config.resolve_rules()?;

    let rendered = match args.output {
        RulesOutput::Toml => {
            #[derive(serde::Serialize)]
            struct RulesTable<'a> {
                rules: &'a crate::rules::ResolvedRules,
            }
            toml::to_string(&RulesTable { rules: &rules }).context("Failed to render rules")?
        }
        RulesOutput::Json => {
            serde_json::to_string_pretty(&rules).context("Failed to render rules")?
        }
    };

    println!("{}", rendered.trim_end());
    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path: PathBuf = args.path;

    if config_path.exists() && !args.force {
        return Err(LintError::Config(ConfigError::AlreadyExists { path: config_path }));
    }

    std::fs::write(&config_path, example_config()?).map_err(|e| LintError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created {}", config_path.display());

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("lintcommit {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
