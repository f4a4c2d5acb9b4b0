//! GitHub authentication

use crate::error::{Error, Result};
use std::env;
use tokio::process::Command;

/// Where an authentication token was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the gh CLI.
    Cli,
    /// Token from an environment variable.
    EnvVar,
}

/// Resolved GitHub authentication.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Authentication token.
    pub token: String,
    /// Where the token was obtained from.
    pub source: AuthSource,
}

/// Get GitHub authentication.
///
/// Priority:
/// 1. gh CLI (`gh auth token`)
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
pub async fn get_github_auth() -> Result<AuthConfig> {
    if let Some(token) = get_gh_cli_token().await {
        return Ok(AuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    if let Ok(token) = env::var("GITHUB_TOKEN") {
        return Ok(AuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    if let Ok(token) = env::var("GH_TOKEN") {
        return Ok(AuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    Err(Error::Auth(
        "No GitHub authentication found. Run `gh auth login` or set GITHUB_TOKEN".to_string(),
    ))
}

async fn get_gh_cli_token() -> Option<String> {
    // Check gh is available
    Command::new("gh").arg("--version").output().await.ok()?;

    // Check authenticated
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        return None;
    }

    // Get token
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}
