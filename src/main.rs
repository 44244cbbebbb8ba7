//! bidsync - register Prebid bidders across POC repositories
//!
//! CLI binary that patches the Prebid build manifest, the AMS helper
//! array, and the pubfig submodule pointer, then opens correlated PRs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "bidsync")]
#[command(about = "Registers Prebid bidder adapters across the POC repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch all three repositories and open pull requests
    Run {
        /// Comma-separated or JSON array of bidder slugs, e.g. 'kargo, teads'
        #[arg(long)]
        bidders: String,

        /// Path to the Prebid.js checkout
        #[arg(long)]
        prebid_repo: PathBuf,

        /// Path to the pubfig checkout
        #[arg(long)]
        pubfig_repo: PathBuf,

        /// Path to the ad-management-service checkout
        #[arg(long)]
        ams_repo: PathBuf,

        /// Base branch to fork the feature branch from
        #[arg(long, default_value = "main")]
        base_branch: String,

        /// Show what would be done without touching any repository
        #[arg(long)]
        dry_run: bool,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            bidders,
            prebid_repo,
            pubfig_repo,
            ams_repo,
            base_branch,
            dry_run,
        } => {
            cli::run_register(cli::RunArgs {
                bidders,
                prebid_repo,
                pubfig_repo,
                ams_repo,
                base_branch,
                dry_run,
            })
            .await?;
        }
        Commands::Auth { action } => {
            let action_str = match action {
                AuthAction::Test => "test",
                AuthAction::Setup => "setup",
            };
            cli::run_auth(action_str).await?;
        }
    }

    Ok(())
}
