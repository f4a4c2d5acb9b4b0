//! CLI commands for vault-publish.

use anstream::println;
use anyhow::{Result, bail};
use async_trait::async_trait;
use clap::Args;
use owo_colors::OwoColorize;
use vault_publish::notify::Notifier;
use vault_publish::publish::{BranchPublisher, generate_branch_name};
use vault_publish::remote::create_remote_service;
use vault_publish::types::RepoReference;

/// Target repository arguments shared by all commands.
#[derive(Debug, Args)]
pub struct Target {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Mainline branch to cut from and merge into
    #[arg(long, default_value = "main")]
    pub base: String,

    /// Remove remote files absent from the local source after publishing
    #[arg(long)]
    pub autoclean: bool,
}

impl Target {
    fn to_repo(&self) -> RepoReference {
        RepoReference {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            branch: self.base.clone(),
            autoclean: self.autoclean,
        }
    }
}

/// Notifier that prints to the terminal.
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, message: &str) {
        println!("{} {}", "⚠️".yellow(), message.yellow());
    }
}

/// Run the `branch` command: create a publishing branch.
pub async fn run_branch(target: &Target, name: Option<String>, host: Option<String>) -> Result<()> {
    let repo = target.to_repo();
    let branch_name = name.unwrap_or_else(generate_branch_name);

    let remote = create_remote_service(host).await?;
    let notifier = ConsoleNotifier;
    let publisher = BranchPublisher::new(remote.as_ref(), &notifier);

    if publisher.create_branch(&branch_name, &repo).await? {
        println!(
            "{} Created publishing branch {} on {}",
            "✅".green(),
            branch_name.cyan(),
            repo.to_string().cyan()
        );
        Ok(())
    } else {
        bail!("could not create branch '{branch_name}' on {repo}");
    }
}

/// Run the `update` command: open/find the pull request, merge it, and
/// clean up the publishing branch.
pub async fn run_update(target: &Target, name: &str, host: Option<String>) -> Result<()> {
    let repo = target.to_repo();

    let remote = create_remote_service(host).await?;
    let notifier = ConsoleNotifier;
    let publisher = BranchPublisher::new(remote.as_ref(), &notifier);

    if publisher.publish_and_merge(name, &repo).await? {
        println!(
            "{} Merged publishing branch {} into {}",
            "✅".green(),
            name.cyan(),
            repo.branch.cyan()
        );
        Ok(())
    } else {
        bail!("merge failed for branch '{name}' on {repo}");
    }
}
