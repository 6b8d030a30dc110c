// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and `extends` resolution.

use crate::error::{ConfigError, LintError, Result};
use crate::rules::{presets, ResolvedRules};
use std::path::{Path, PathBuf};

use super::schema::LintConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &[
    "lintcommit.toml",
    ".lintcommit.toml",
    ".config/lintcommit.toml",
];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("lintcommit").join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<LintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using project rules");
            Ok(LintConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let mut config = parse_config(&content)?;
    config.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

/// Parse configuration from a TOML string.
///
/// Duplicate rule names are rejected here by the TOML parser.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    toml::from_str(content).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Whether an `extends` entry refers to a file rather than a preset.
fn is_file_reference(entry: &str) -> bool {
    entry.starts_with("./") || entry.starts_with("../") || entry.ends_with(".toml")
}

/// Resolve a configuration's rules: every `extends` entry in order, then the
/// local rules on top.
pub fn resolve_rules(config: &LintConfig) -> Result<ResolvedRules> {
    let mut visiting = Vec::new();
    let resolved = resolve_with(config, &mut visiting)?;
    if resolved.iter().all(|(_, spec)| !spec.is_enabled()) {
        tracing::warn!("Configuration enables no rules; every message will pass");
    }
    Ok(resolved)
}

fn resolve_with(config: &LintConfig, visiting: &mut Vec<PathBuf>) -> Result<ResolvedRules> {
    let mut resolved = ResolvedRules::default();

    for entry in &config.extends {
        if is_file_reference(entry) {
            let base_dir = config
                .base_dir
                .clone()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_default();
            let path = base_dir.join(entry);
            let key = path.canonicalize().unwrap_or_else(|_| path.clone());

            if visiting.contains(&key) {
                return Err(LintError::Config(ConfigError::ExtendsCycle { path }));
            }

            tracing::debug!("Resolving extends file: {:?}", path);
            let base = load_config_from(&path)?;
            visiting.push(key);
            let base_rules = resolve_with(&base, visiting)?;
            visiting.pop();
            resolved.overlay(&base_rules);
        } else {
            let preset = presets::find_preset(entry).ok_or_else(|| {
                LintError::Config(ConfigError::UnknownPreset {
                    name: entry.clone(),
                })
            })?;
            tracing::debug!("Resolving extends preset: {}", entry);
            resolved.overlay(&preset.resolve()?);
        }
    }

    resolved.overlay_rules(&config.rules);
    Ok(resolved)
}
