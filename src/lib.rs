//! Branch + pull request publishing automation for GitHub-hosted vaults.
//!
//! The crate orchestrates one publish cycle against a remote repository:
//! cut a short-lived publishing branch from the mainline, open a pull
//! request from it, squash-merge the pull request, and delete the branch.
//! All state lives in the remote repository; every operation is an
//! independent remote call parameterized by a [`types::RepoReference`].

pub mod auth;
pub mod error;
pub mod notify;
pub mod publish;
pub mod remote;
pub mod types;
