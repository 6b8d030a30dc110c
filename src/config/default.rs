// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use crate::error::Result;
use crate::error::ResultExt;

use super::schema::LintConfig;

/// Get the default configuration (the project rule set).
pub fn default_config() -> LintConfig {
    LintConfig::default()
}

/// Render the default configuration as a commented TOML file.
pub fn example_config() -> Result<String> {
    let body = toml::to_string(&default_config()).context("Failed to render configuration")?;
    Ok(format!(
        "# lintcommit configuration\n\
         # Rules are [severity, applicability, value]:\n\
         #   severity: 0 = disabled, 1 = warning, 2 = error\n\
         #   applicability: \"always\" or \"never\"\n\
         \n{}",
        body
    ))
}
