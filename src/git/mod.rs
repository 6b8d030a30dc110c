// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from history so they can be linted.

mod repo;

pub use repo::{get_commit_message, get_commit_range, open_repo, Repository};
