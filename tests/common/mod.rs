//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_remote;

use vault_publish::types::{Branch, PullRequest, RepoReference};

/// Standard target repository used across tests.
pub fn make_repo() -> RepoReference {
    RepoReference::new("a", "b", "main")
}

/// Build a branch listing entry.
pub fn make_branch(name: &str, sha: &str) -> Branch {
    Branch {
        name: name.to_string(),
        sha: sha.to_string(),
    }
}

/// Build an open pull request with the given number and head branch.
pub fn make_pull(number: u64, head: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/a/b/pull/{number}"),
        head_ref: head.to_string(),
        base_ref: "main".to_string(),
        title: format!("Publish {head}"),
    }
}
