//! Remote repository capability.
//!
//! The publishing orchestrator consumes the remote host through this narrow
//! trait: list branches, create and delete refs, open and list pull
//! requests, merge a pull request. Each call is parameterized by a
//! [`RepoReference`]; implementations hold no per-repository state.

mod factory;
mod github;

pub use factory::create_remote_service;
pub use github::GitHubRemote;

use crate::error::Result;
use crate::types::{
    Branch, CreatePullOutcome, CreateRefOutcome, MergeOutcome, PullRequest, RepoReference,
};
use async_trait::async_trait;

/// Remote hosting capability consumed by the branch publisher.
///
/// Expected conflicts (ref exists, duplicate pull request, merge rejected)
/// are reported as `Ok` outcome variants so the orchestrator can switch on
/// them; `Err` is reserved for transport failures and unexpected responses.
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// List all branches of the repository with their current commit shas.
    async fn list_branches(&self, repo: &RepoReference) -> Result<Vec<Branch>>;

    /// Create `refs/heads/<branch_name>` pointing at `sha`.
    async fn create_ref(
        &self,
        repo: &RepoReference,
        branch_name: &str,
        sha: &str,
    ) -> Result<CreateRefOutcome>;

    /// Delete `refs/heads/<branch_name>`.
    async fn delete_ref(&self, repo: &RepoReference, branch_name: &str) -> Result<()>;

    /// Open a pull request from `head` into `base`.
    async fn create_pull(
        &self,
        repo: &RepoReference,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatePullOutcome>;

    /// List all open pull requests for the repository.
    async fn list_open_pulls(&self, repo: &RepoReference) -> Result<Vec<PullRequest>>;

    /// Request a squash merge of a pull request with the given commit title.
    async fn merge_pull(
        &self,
        repo: &RepoReference,
        number: u64,
        commit_title: &str,
    ) -> Result<MergeOutcome>;
}
