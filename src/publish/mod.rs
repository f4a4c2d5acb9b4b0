//! Branch and pull request lifecycle orchestration.
//!
//! One publish cycle walks the remote repository through
//! `NoBranch → BranchCreated → PullRequestOpen → Merged → BranchDeleted`,
//! recovering inline when a step finds pre-existing state (an existing
//! branch, an existing open pull request) and stopping when the remote
//! rejects the merge. No step is ever retried; every recovery is a single
//! one-shot fallback query.

use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::remote::RemoteRepository;
use crate::types::{CreatePullOutcome, CreateRefOutcome, MergeOutcome, RepoReference};
use chrono::Utc;
use tracing::{debug, warn};

/// Prefix for generated publishing branch names.
const BRANCH_PREFIX: &str = "vault";

/// Generate a publishing branch name of the form `vault-<UTC timestamp>`.
///
/// Names are expected unique per publish run; callers may also supply
/// their own.
#[must_use]
pub fn generate_branch_name() -> String {
    format!("{BRANCH_PREFIX}-{}", Utc::now().format("%Y%m%d%H%M%S"))
}

/// Title for the pull request opened from a publishing branch.
fn pull_title(branch_name: &str) -> String {
    format!("Publish {branch_name}")
}

/// Commit title for the squash merge of a pull request.
fn merge_commit_title(number: u64) -> String {
    format!("[vault-publish] Merge #{number}")
}

/// Orchestrates the branch → pull request → merge → cleanup lifecycle for
/// one publish operation against one target repository.
///
/// Holds no repository state: every operation is parameterized by the
/// [`RepoReference`] and the branch/pull-request identifiers passed in, so
/// independent publish cycles may run concurrently.
pub struct BranchPublisher<'a> {
    remote: &'a dyn RemoteRepository,
    notifier: &'a dyn Notifier,
}

impl<'a> BranchPublisher<'a> {
    /// Create a publisher over the given remote capability and
    /// notification channel.
    pub const fn new(remote: &'a dyn RemoteRepository, notifier: &'a dyn Notifier) -> Self {
        Self { remote, notifier }
    }

    /// Create the publishing branch, cut from the current head of the
    /// mainline branch.
    ///
    /// Idempotent: a branch that already exists (possibly stale) is treated
    /// as success, and a repeat call performs only the listing read. Fails
    /// with [`Error::ReferenceNotFound`] when the mainline branch is absent
    /// from the remote listing; that is a precondition violation, not a
    /// recoverable case.
    pub async fn create_branch(&self, branch_name: &str, repo: &RepoReference) -> Result<bool> {
        let branches = self.remote.list_branches(repo).await?;

        if branches.iter().any(|b| b.name == branch_name) {
            debug!(%repo, branch_name, "publishing branch already exists, reusing");
            return Ok(true);
        }

        let mainline = branches
            .iter()
            .find(|b| b.name == repo.branch)
            .ok_or_else(|| Error::ReferenceNotFound(repo.branch.clone()))?;

        match self
            .remote
            .create_ref(repo, branch_name, &mainline.sha)
            .await?
        {
            CreateRefOutcome::Created => {
                debug!(%repo, branch_name, sha = %mainline.sha, "created publishing branch");
                Ok(true)
            }
            // Lost a creation race: confirm the branch is actually there
            CreateRefOutcome::AlreadyExists => {
                let branches = self.remote.list_branches(repo).await?;
                let found = branches.iter().any(|b| b.name == branch_name);
                debug!(%repo, branch_name, found, "ref creation conflict, re-listed branches");
                Ok(found)
            }
        }
    }

    /// Open a pull request from the publishing branch into the mainline,
    /// or discover an already-open one.
    ///
    /// On a creation conflict (duplicate head, or no diff from the base)
    /// the open list is consulted once: a pull request whose head matches
    /// `branch_name` is preferred, otherwise the first open pull request is
    /// taken. An empty list fails with [`Error::NoOpenPullRequest`].
    pub async fn open_or_find_pull_request(
        &self,
        branch_name: &str,
        repo: &RepoReference,
    ) -> Result<u64> {
        let title = pull_title(branch_name);
        match self
            .remote
            .create_pull(repo, branch_name, &repo.branch, &title, "")
            .await?
        {
            CreatePullOutcome::Created(pr) => {
                debug!(%repo, pr_number = pr.number, "opened pull request");
                Ok(pr.number)
            }
            CreatePullOutcome::Conflict { message } => {
                debug!(%repo, branch_name, ?message, "pull request creation conflict, listing open");
                let open = self.remote.list_open_pulls(repo).await?;
                let found = open
                    .iter()
                    .find(|pr| pr.head_ref == branch_name)
                    .or_else(|| open.first())
                    .ok_or(Error::NoOpenPullRequest)?;
                debug!(%repo, pr_number = found.number, "found existing pull request");
                Ok(found.number)
            }
        }
    }

    /// Request a squash merge of the pull request.
    ///
    /// A rejected merge (conflict, branch protection, already merged) is
    /// reported to the notification channel unless `silent`, and returns
    /// `Ok(false)`. Merges are never retried: conflicts require human
    /// intervention.
    pub async fn merge_pull_request(
        &self,
        number: u64,
        repo: &RepoReference,
        silent: bool,
    ) -> Result<bool> {
        let commit_title = merge_commit_title(number);
        match self.remote.merge_pull(repo, number, &commit_title).await? {
            MergeOutcome::Merged { sha } => {
                debug!(%repo, pr_number = number, ?sha, "merged pull request");
                Ok(true)
            }
            MergeOutcome::Conflict { message } => {
                warn!(%repo, pr_number = number, ?message, "merge rejected");
                if !silent {
                    self.notifier.notify(&conflict_message(number)).await;
                }
                Ok(false)
            }
        }
    }

    /// Delete the publishing branch.
    ///
    /// Best effort: any failure (ref missing, permission denied, transport
    /// error) is swallowed and logged. An orphaned branch is acceptable
    /// collateral and never blocks the publish result.
    pub async fn delete_branch(&self, branch_name: &str, repo: &RepoReference) -> bool {
        match self.remote.delete_ref(repo, branch_name).await {
            Ok(()) => {
                debug!(%repo, branch_name, "deleted publishing branch");
                true
            }
            Err(e) => {
                warn!(%repo, branch_name, error = %e, "failed to delete publishing branch");
                false
            }
        }
    }

    /// Run the update step of a publish cycle: open (or discover) the pull
    /// request, merge it, and on success delete the publishing branch.
    ///
    /// Returns `Ok(true)` only when the merge succeeded; the deletion
    /// outcome never affects the result. A merge rejection is reported to
    /// the notification channel once per cycle. Pull request discovery
    /// failures propagate as errors.
    pub async fn publish_and_merge(&self, branch_name: &str, repo: &RepoReference) -> Result<bool> {
        let number = self.open_or_find_pull_request(branch_name, repo).await?;
        let merged = self.merge_pull_request(number, repo, true).await?;

        if merged {
            self.delete_branch(branch_name, repo).await;
            Ok(true)
        } else {
            self.notifier.notify(&conflict_message(number)).await;
            Ok(false)
        }
    }
}

/// User-facing message for a rejected merge.
fn conflict_message(number: u64) -> String {
    format!(
        "Pull request #{number} could not be merged automatically. \
         Resolve the conflict on the remote and publish again."
    )
}
