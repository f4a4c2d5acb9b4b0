//! GitHub remote repository implementation

use crate::error::{Error, Result};
use crate::remote::RemoteRepository;
use crate::types::{
    Branch, CreatePullOutcome, CreateRefOutcome, MergeOutcome, PullRequest, RepoReference,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
const USER_AGENT: &str = "vault-publish";

/// REST API version header value
const API_VERSION: &str = "2022-11-28";

/// GitHub remote using reqwest
pub struct GitHubRemote {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Deserialize)]
struct BranchEntry {
    name: String,
    commit: CommitEntry,
}

#[derive(Deserialize)]
struct CommitEntry {
    sha: String,
}

#[derive(Deserialize)]
struct PullEntry {
    number: u64,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    title: String,
    head: RefEntry,
    base: RefEntry,
}

#[derive(Deserialize)]
struct RefEntry {
    #[serde(rename = "ref")]
    ref_field: String,
}

impl From<PullEntry> for PullRequest {
    fn from(pr: PullEntry) -> Self {
        Self {
            number: pr.number,
            html_url: pr.html_url,
            head_ref: pr.head.ref_field,
            base_ref: pr.base.ref_field,
            title: pr.title,
        }
    }
}

#[derive(Serialize)]
struct CreateRefPayload {
    #[serde(rename = "ref")]
    ref_field: String,
    sha: String,
}

#[derive(Serialize)]
struct CreatePullPayload {
    title: String,
    body: String,
    head: String,
    base: String,
}

#[derive(Deserialize)]
struct MergeResponse {
    #[serde(default)]
    merged: bool,
    sha: Option<String>,
    message: Option<String>,
}

/// Error body shape shared by GitHub API rejections
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl GitHubRemote {
    /// Create a new GitHub remote.
    ///
    /// `host` selects a GitHub Enterprise instance (`https://<host>/api/v3`);
    /// `None` targets `api.github.com`.
    pub fn new(token: &str, host: Option<String>) -> Result<Self> {
        let base_url = host.map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_base_url(token, base_url)
    }

    /// Create a remote against an explicit API base URL.
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Remote(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.to_string(),
            base_url: base_url.into(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Pull the human-readable message out of a rejection body, if any.
    async fn rejection_message(response: Response) -> Option<String> {
        response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
    }
}

#[async_trait]
impl RemoteRepository for GitHubRemote {
    async fn list_branches(&self, repo: &RepoReference) -> Result<Vec<Branch>> {
        debug!(%repo, "listing branches");
        let url = self.api_url(&format!("/repos/{}/{}/branches", repo.owner, repo.repo));

        let entries: Vec<BranchEntry> = self
            .with_headers(self.client.get(&url))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Remote(e.to_string()))?
            .json()
            .await?;

        debug!(%repo, count = entries.len(), "listed branches");
        Ok(entries
            .into_iter()
            .map(|b| Branch {
                name: b.name,
                sha: b.commit.sha,
            })
            .collect())
    }

    async fn create_ref(
        &self,
        repo: &RepoReference,
        branch_name: &str,
        sha: &str,
    ) -> Result<CreateRefOutcome> {
        debug!(%repo, branch_name, sha, "creating ref");
        let url = self.api_url(&format!("/repos/{}/{}/git/refs", repo.owner, repo.repo));

        let payload = CreateRefPayload {
            ref_field: format!("refs/heads/{branch_name}"),
            sha: sha.to_string(),
        };

        let response = self
            .with_headers(self.client.post(&url))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                debug!(%repo, branch_name, "created ref");
                Ok(CreateRefOutcome::Created)
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                debug!(%repo, branch_name, "ref already exists");
                Ok(CreateRefOutcome::AlreadyExists)
            }
            status => {
                let message = Self::rejection_message(response).await.unwrap_or_default();
                Err(Error::Remote(format!(
                    "ref creation returned {status}: {message}"
                )))
            }
        }
    }

    async fn delete_ref(&self, repo: &RepoReference, branch_name: &str) -> Result<()> {
        debug!(%repo, branch_name, "deleting ref");
        let url = self.api_url(&format!(
            "/repos/{}/{}/git/refs/heads/{branch_name}",
            repo.owner, repo.repo
        ));

        // api.github.com answers 204 No Content; any success status counts.
        let response = self.with_headers(self.client.delete(&url)).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(%repo, branch_name, "deleted ref");
            Ok(())
        } else {
            let message = Self::rejection_message(response).await.unwrap_or_default();
            Err(Error::Remote(format!(
                "ref deletion returned {status}: {message}"
            )))
        }
    }

    async fn create_pull(
        &self,
        repo: &RepoReference,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatePullOutcome> {
        debug!(%repo, head, base, "creating pull request");
        let url = self.api_url(&format!("/repos/{}/{}/pulls", repo.owner, repo.repo));

        let payload = CreatePullPayload {
            title: title.to_string(),
            body: body.to_string(),
            head: head.to_string(),
            base: base.to_string(),
        };

        let response = self
            .with_headers(self.client.post(&url))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                let pr: PullRequest = response.json::<PullEntry>().await?.into();
                debug!(%repo, pr_number = pr.number, "created pull request");
                Ok(CreatePullOutcome::Created(pr))
            }
            // 422 covers both "a pull request already exists for this head"
            // and "no commits between base and head"
            StatusCode::UNPROCESSABLE_ENTITY => {
                let message = Self::rejection_message(response).await;
                debug!(%repo, head, ?message, "pull request creation conflict");
                Ok(CreatePullOutcome::Conflict { message })
            }
            status => {
                let message = Self::rejection_message(response).await.unwrap_or_default();
                Err(Error::Remote(format!(
                    "pull request creation returned {status}: {message}"
                )))
            }
        }
    }

    async fn list_open_pulls(&self, repo: &RepoReference) -> Result<Vec<PullRequest>> {
        debug!(%repo, "listing open pull requests");
        let url = self.api_url(&format!("/repos/{}/{}/pulls", repo.owner, repo.repo));

        let entries: Vec<PullEntry> = self
            .with_headers(self.client.get(&url))
            .query(&[("state", "open")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Remote(e.to_string()))?
            .json()
            .await?;

        debug!(%repo, count = entries.len(), "listed open pull requests");
        Ok(entries.into_iter().map(Into::into).collect())
    }

    async fn merge_pull(
        &self,
        repo: &RepoReference,
        number: u64,
        commit_title: &str,
    ) -> Result<MergeOutcome> {
        debug!(%repo, pr_number = number, "merging pull request");
        let url = self.api_url(&format!(
            "/repos/{}/{}/pulls/{number}/merge",
            repo.owner, repo.repo
        ));

        let response = self
            .with_headers(self.client.put(&url))
            .json(&serde_json::json!({
                "commit_title": commit_title,
                "merge_method": "squash",
            }))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let merge: MergeResponse = response.json().await?;
                let outcome = if merge.merged {
                    MergeOutcome::Merged { sha: merge.sha }
                } else {
                    MergeOutcome::Conflict {
                        message: merge.message,
                    }
                };
                debug!(%repo, pr_number = number, merged = outcome.is_merged(), "merge complete");
                Ok(outcome)
            }
            // 405: not mergeable, 409: head changed, 403: branch protection
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::CONFLICT | StatusCode::FORBIDDEN => {
                let message = Self::rejection_message(response).await;
                debug!(%repo, pr_number = number, ?message, "merge rejected");
                Ok(MergeOutcome::Conflict { message })
            }
            status => {
                let message = Self::rejection_message(response).await.unwrap_or_default();
                Err(Error::Remote(format!(
                    "merge returned {status}: {message}"
                )))
            }
        }
    }
}
