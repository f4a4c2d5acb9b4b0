//! Core types for vault-publish.

use serde::{Deserialize, Serialize};

/// Immutable description of the target remote repository.
///
/// Supplied by the caller once per publish operation and threaded through
/// every remote call; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoReference {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Mainline branch name (e.g. "main") from which publishing branches
    /// are cut and into which pull requests merge.
    pub branch: String,
    /// Whether remote files absent from the local source should be removed
    /// after publishing. Consumed by file-management layers, not by the
    /// branch lifecycle itself.
    pub autoclean: bool,
}

impl RepoReference {
    /// Create a reference with `autoclean` disabled.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            autoclean: false,
        }
    }
}

impl std::fmt::Display for RepoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// One entry of the remote branch listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Commit sha the branch currently points at.
    pub sha: String,
}

/// A pull request as reported by the remote host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// Remote-assigned pull request number.
    pub number: u64,
    /// Web URL for the pull request.
    pub html_url: String,
    /// Head branch name (the publishing branch).
    pub head_ref: String,
    /// Base branch name (the mainline).
    pub base_ref: String,
    /// Pull request title.
    pub title: String,
}

/// Outcome of attempting to create a ref on the remote.
///
/// "Already exists" is an expected conflict recovered by the orchestrator,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateRefOutcome {
    /// The ref was created (HTTP 201).
    Created,
    /// A ref with that name already exists on the remote.
    AlreadyExists,
}

/// Outcome of attempting to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePullOutcome {
    /// The pull request was created.
    Created(PullRequest),
    /// Creation was rejected: a pull request for this head already exists,
    /// or the head has no diff from the base.
    Conflict {
        /// Remote-provided rejection message, when available.
        message: Option<String>,
    },
}

/// Outcome of requesting a pull request merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merge was accepted.
    Merged {
        /// Sha of the merge commit, when reported.
        sha: Option<String>,
    },
    /// The remote rejected the merge (conflict, branch protection, or the
    /// pull request is not in a mergeable state).
    Conflict {
        /// Remote-provided rejection message, when available.
        message: Option<String>,
    },
}

impl MergeOutcome {
    /// Whether the merge was accepted.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}
