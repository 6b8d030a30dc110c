// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for lintcommit.
//!
//! This module handles loading and parsing configuration files and resolving
//! the rule sets they extend.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use schema::*;
