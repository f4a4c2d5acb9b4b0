//! Mock remote repository for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use vault_publish::error::{Error, Result};
use vault_publish::notify::Notifier;
use vault_publish::remote::RemoteRepository;
use vault_publish::types::{
    Branch, CreatePullOutcome, CreateRefOutcome, MergeOutcome, PullRequest, RepoReference,
};

/// Call record for `create_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRefCall {
    pub branch: String,
    pub sha: String,
}

/// Call record for `create_pull`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Call record for `merge_pull`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub number: u64,
    pub commit_title: String,
}

/// Simple mock remote repository for testing
///
/// This manually implements `RemoteRepository` with an in-memory branch
/// list so the read-after-write fallback paths behave like a real remote.
///
/// Features:
/// - Auto-incrementing pull request numbers
/// - Call tracking for verification
/// - Configurable conflict outcomes per operation
/// - Error injection for failure path testing
pub struct MockRemote {
    branches: Mutex<Vec<Branch>>,
    open_pulls: Mutex<Vec<PullRequest>>,
    next_pull_number: AtomicU64,
    // Conflict configuration
    ref_conflict: Mutex<Option<RefConflict>>,
    pull_conflict: Mutex<Option<Option<String>>>,
    merge_conflict: Mutex<Option<Option<String>>>,
    // Call tracking
    list_branches_calls: AtomicU64,
    list_pulls_calls: AtomicU64,
    create_ref_calls: Mutex<Vec<CreateRefCall>>,
    delete_ref_calls: Mutex<Vec<String>>,
    create_pull_calls: Mutex<Vec<CreatePullCall>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    // Error injection
    error_on_list_branches: Mutex<Option<String>>,
    error_on_list_pulls: Mutex<Option<String>>,
    error_on_delete_ref: Mutex<Option<String>>,
    error_on_merge: Mutex<Option<String>>,
}

/// Configured behavior for a ref-creation conflict
#[derive(Debug, Clone, Copy)]
struct RefConflict {
    /// Whether the conflicting branch shows up in subsequent listings
    appears_in_listing: bool,
}

impl MockRemote {
    /// Create a mock whose remote holds the given branches.
    pub fn with_branches(branches: Vec<Branch>) -> Self {
        Self {
            branches: Mutex::new(branches),
            open_pulls: Mutex::new(Vec::new()),
            next_pull_number: AtomicU64::new(1),
            ref_conflict: Mutex::new(None),
            pull_conflict: Mutex::new(None),
            merge_conflict: Mutex::new(None),
            list_branches_calls: AtomicU64::new(0),
            list_pulls_calls: AtomicU64::new(0),
            create_ref_calls: Mutex::new(Vec::new()),
            delete_ref_calls: Mutex::new(Vec::new()),
            create_pull_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            error_on_list_branches: Mutex::new(None),
            error_on_list_pulls: Mutex::new(None),
            error_on_delete_ref: Mutex::new(None),
            error_on_merge: Mutex::new(None),
        }
    }

    // === Configuration methods ===

    /// Replace the remote branch listing.
    pub fn set_branches(&self, branches: Vec<Branch>) {
        *self.branches.lock().unwrap() = branches;
    }

    /// Set the number assigned to the next created pull request.
    pub fn set_next_pull_number(&self, number: u64) {
        self.next_pull_number.store(number, Ordering::SeqCst);
    }

    /// Set the open pull request listing.
    pub fn set_open_pulls(&self, pulls: Vec<PullRequest>) {
        *self.open_pulls.lock().unwrap() = pulls;
    }

    /// Make `create_ref` report an already-existing ref. When `appears`,
    /// the branch also shows up in subsequent listings (another writer won
    /// the race); otherwise the listing stays unchanged.
    pub fn set_ref_conflict(&self, appears: bool) {
        *self.ref_conflict.lock().unwrap() = Some(RefConflict {
            appears_in_listing: appears,
        });
    }

    /// Make `create_pull` report a creation conflict.
    pub fn set_pull_conflict(&self, message: Option<&str>) {
        *self.pull_conflict.lock().unwrap() = Some(message.map(ToString::to_string));
    }

    /// Make `merge_pull` report a rejected merge.
    pub fn set_merge_conflict(&self, message: Option<&str>) {
        *self.merge_conflict.lock().unwrap() = Some(message.map(ToString::to_string));
    }

    // === Error injection methods ===

    /// Make `list_branches` return an error
    pub fn fail_list_branches(&self, msg: &str) {
        *self.error_on_list_branches.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_open_pulls` return an error
    pub fn fail_list_pulls(&self, msg: &str) {
        *self.error_on_list_pulls.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `delete_ref` return an error
    pub fn fail_delete_ref(&self, msg: &str) {
        *self.error_on_delete_ref.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pull` return an error
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Number of `list_branches` calls issued
    pub fn list_branches_count(&self) -> u64 {
        self.list_branches_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_open_pulls` calls issued
    pub fn list_pulls_count(&self) -> u64 {
        self.list_pulls_calls.load(Ordering::SeqCst)
    }

    /// Get all `create_ref` calls
    pub fn get_create_ref_calls(&self) -> Vec<CreateRefCall> {
        self.create_ref_calls.lock().unwrap().clone()
    }

    /// Get all `delete_ref` calls (branch names)
    pub fn get_delete_ref_calls(&self) -> Vec<String> {
        self.delete_ref_calls.lock().unwrap().clone()
    }

    /// Get all `create_pull` calls
    pub fn get_create_pull_calls(&self) -> Vec<CreatePullCall> {
        self.create_pull_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pull` calls
    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Assert that `create_ref` was called with specific branch and sha
    pub fn assert_create_ref_called(&self, branch: &str, sha: &str) {
        let calls = self.get_create_ref_calls();
        assert!(
            calls.iter().any(|c| c.branch == branch && c.sha == sha),
            "Expected create_ref({branch}, {sha}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pull` was NOT called
    pub fn assert_merge_not_called(&self) {
        let calls = self.get_merge_calls();
        assert!(
            calls.is_empty(),
            "Expected no merge_pull calls but got: {calls:?}"
        );
    }
}

#[async_trait]
impl RemoteRepository for MockRemote {
    async fn list_branches(&self, _repo: &RepoReference) -> Result<Vec<Branch>> {
        self.list_branches_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = self.error_on_list_branches.lock().unwrap().as_ref() {
            return Err(Error::Remote(msg.clone()));
        }

        Ok(self.branches.lock().unwrap().clone())
    }

    async fn create_ref(
        &self,
        _repo: &RepoReference,
        branch_name: &str,
        sha: &str,
    ) -> Result<CreateRefOutcome> {
        self.create_ref_calls.lock().unwrap().push(CreateRefCall {
            branch: branch_name.to_string(),
            sha: sha.to_string(),
        });

        if let Some(conflict) = *self.ref_conflict.lock().unwrap() {
            if conflict.appears_in_listing {
                self.branches.lock().unwrap().push(Branch {
                    name: branch_name.to_string(),
                    sha: sha.to_string(),
                });
            }
            return Ok(CreateRefOutcome::AlreadyExists);
        }

        // A created ref shows up in subsequent listings
        self.branches.lock().unwrap().push(Branch {
            name: branch_name.to_string(),
            sha: sha.to_string(),
        });
        Ok(CreateRefOutcome::Created)
    }

    async fn delete_ref(&self, _repo: &RepoReference, branch_name: &str) -> Result<()> {
        self.delete_ref_calls
            .lock()
            .unwrap()
            .push(branch_name.to_string());

        if let Some(msg) = self.error_on_delete_ref.lock().unwrap().as_ref() {
            return Err(Error::Remote(msg.clone()));
        }

        self.branches.lock().unwrap().retain(|b| b.name != branch_name);
        Ok(())
    }

    async fn create_pull(
        &self,
        _repo: &RepoReference,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<CreatePullOutcome> {
        self.create_pull_calls.lock().unwrap().push(CreatePullCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(message) = self.pull_conflict.lock().unwrap().clone() {
            return Ok(CreatePullOutcome::Conflict { message });
        }

        let number = self.next_pull_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/a/b/pull/{number}"),
            head_ref: head.to_string(),
            base_ref: base.to_string(),
            title: title.to_string(),
        };
        self.open_pulls.lock().unwrap().push(pr.clone());
        Ok(CreatePullOutcome::Created(pr))
    }

    async fn list_open_pulls(&self, _repo: &RepoReference) -> Result<Vec<PullRequest>> {
        self.list_pulls_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = self.error_on_list_pulls.lock().unwrap().as_ref() {
            return Err(Error::Remote(msg.clone()));
        }

        Ok(self.open_pulls.lock().unwrap().clone())
    }

    async fn merge_pull(
        &self,
        _repo: &RepoReference,
        number: u64,
        commit_title: &str,
    ) -> Result<MergeOutcome> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            number,
            commit_title: commit_title.to_string(),
        });

        if let Some(msg) = self.error_on_merge.lock().unwrap().as_ref() {
            return Err(Error::Remote(msg.clone()));
        }

        if let Some(message) = self.merge_conflict.lock().unwrap().clone() {
            return Ok(MergeOutcome::Conflict { message });
        }

        Ok(MergeOutcome::Merged {
            sha: Some(format!("merged_sha_{number}")),
        })
    }
}

/// Notifier that records delivered messages for verification
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

impl RecordingNotifier {
    /// Get all delivered messages
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}
