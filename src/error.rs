//! Error types for vault-publish.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the publishing workflow.
///
/// Expected conflicts (branch already exists, duplicate pull request,
/// merge rejected) are *not* errors: the remote capability reports them
/// as outcome variants in [`crate::types`] and the orchestrator recovers
/// inline. Only fatal conditions end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// The mainline branch is absent from the remote branch listing.
    #[error("mainline branch '{0}' not found on remote")]
    ReferenceNotFound(String),

    /// Pull request fallback discovery found no open pull requests.
    #[error("no open pull request found for repository")]
    NoOpenPullRequest,

    /// The remote API returned an unexpected status or payload.
    #[error("remote API error: {0}")]
    Remote(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No usable authentication token could be resolved.
    #[error("authentication error: {0}")]
    Auth(String),
}
