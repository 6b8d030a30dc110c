// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, LintError, Result};
use git2::{Repository as Git2Repo, Sort};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository for reading commit history.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            LintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                LintError::Git(GitError::NotARepository)
            } else {
                LintError::Git(GitError::from(e))
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Path of the `.git` directory.
    pub fn git_dir(&self) -> PathBuf {
        self.inner.path().to_path_buf()
    }

    /// Get a commit's id and message by reference (SHA, branch name, etc.).
    pub fn commit_message(&self, reference: &str) -> Result<(String, String)> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok((
            commit.id().to_string(),
            commit_text(&commit),
        ))
    }

    /// Get id and message of every commit in `from..to`, oldest first.
    pub fn commit_range(&self, range: &str) -> Result<Vec<(String, String)>> {
        let walk_err = |e: git2::Error| {
            LintError::Git(GitError::WalkFailed {
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self.inner.revwalk().map_err(walk_err)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .map_err(walk_err)?;
        revwalk.push_range(range).map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", range, e.message()),
            })
        })?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(walk_err)?;
            let commit = self.inner.find_commit(oid).map_err(walk_err)?;
            commits.push((oid.to_string(), commit_text(&commit)));
        }

        Ok(commits)
    }
}

/// A commit's message; bytes that are not UTF-8 are replaced, not dropped.
fn commit_text(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

/// Open the repository containing the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Get a commit's id and message by reference.
pub fn get_commit_message(reference: &str) -> Result<(String, String)> {
    open_repo()?.commit_message(reference)
}

/// Get the commits of a range such as `HEAD~5..HEAD`.
pub fn get_commit_range(range: &str) -> Result<Vec<(String, String)>> {
    open_repo()?.commit_range(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit<'_>> = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap();
    }

    #[test]
    fn test_not_a_repository() {
        let dir = TempDir::new().unwrap();
        // A temp dir may live inside a repository on some machines
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(matches!(
                Repository::open(dir.path()),
                Err(LintError::Git(GitError::NotARepository))
            ));
        }
    }

    #[test]
    fn test_commit_message_and_range() {
        let dir = TempDir::new().unwrap();
        let git = Git2Repo::init(dir.path()).unwrap();
        commit(&git, "chore: initial");
        commit(&git, "feat: add login page");
        commit(&git, "Fix: Broken Build");

        let repo = Repository::open(dir.path()).unwrap();
        let (_, head) = repo.commit_message("HEAD").unwrap();
        assert_eq!(head, "Fix: Broken Build");

        let range = repo.commit_range("HEAD~2..HEAD").unwrap();
        let messages: Vec<&str> = range.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["feat: add login page", "Fix: Broken Build"]);
    }

    #[test]
    fn test_invalid_reference() {
        let dir = TempDir::new().unwrap();
        let git = Git2Repo::init(dir.path()).unwrap();
        commit(&git, "chore: initial");

        let repo = Repository::open(dir.path()).unwrap();
        assert!(matches!(
            repo.commit_message("no-such-branch"),
            Err(LintError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_non_utf8_message_kept() {
        let dir = TempDir::new().unwrap();
        let git = Git2Repo::init(dir.path()).unwrap();
        let tree_id = git.index().unwrap().write_tree().unwrap();

        let mut raw = format!(
            "tree {}\nauthor Test <test@example.com> 0 +0000\n\
             committer Test <test@example.com> 0 +0000\n\n",
            tree_id
        )
        .into_bytes();
        raw.extend_from_slice(b"feat: add caf\xe9 menu\n");
        let oid = git.odb().unwrap().write(git2::ObjectType::Commit, &raw).unwrap();

        let text = commit_text(&git.find_commit(oid).unwrap());
        assert!(text.starts_with("feat: add caf"));
        assert!(text.contains('\u{FFFD}'));
    }
}
