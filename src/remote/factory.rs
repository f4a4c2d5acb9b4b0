//! Remote service factory
//!
//! Resolves authentication and constructs the remote capability.

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::remote::{GitHubRemote, RemoteRepository};

/// Create a remote service for the given API host.
///
/// `host` selects a GitHub Enterprise instance; `None` targets github.com.
pub async fn create_remote_service(host: Option<String>) -> Result<Box<dyn RemoteRepository>> {
    let auth = get_github_auth().await?;
    Ok(Box::new(GitHubRemote::new(&auth.token, host)?))
}
