//! vault-publish - branch + pull request publishing automation
//!
//! CLI binary for driving one publish cycle against a GitHub repository.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "vault-publish")]
#[command(about = "Publish changes to a GitHub repository via short-lived branches and pull requests")]
#[command(version)]
struct Cli {
    /// GitHub Enterprise API host (defaults to github.com)
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a publishing branch cut from the mainline branch
    Branch {
        #[command(flatten)]
        target: cli::Target,

        /// Branch name (defaults to a generated vault-<timestamp> name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Open (or discover) the pull request for a publishing branch,
    /// squash-merge it, and delete the branch
    Update {
        #[command(flatten)]
        target: cli::Target,

        /// Publishing branch name
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Branch { target, name } => {
            cli::run_branch(&target, name, cli.host).await?;
        }
        Commands::Update { target, name } => {
            cli::run_update(&target, &name, cli.host).await?;
        }
    }

    Ok(())
}
