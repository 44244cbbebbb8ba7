//! Run command - patch the three repositories and open PRs

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::println;
use anyhow::{Context, Result, bail};
use bidsync::bidders::{branch_name, parse_bidders};
use bidsync::types::{AMS_HELPER_FILE, PREBID_MODULES_FILE, PUBFIG_SUBMODULE_PATH, RepoTargets};
use bidsync::workflow::{RunOptions, execute_run};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the run command
pub struct RunArgs {
    /// Raw bidder list as given on the command line
    pub bidders: String,
    /// Prebid.js checkout
    pub prebid_repo: PathBuf,
    /// pubfig checkout
    pub pubfig_repo: PathBuf,
    /// ad-management-service checkout
    pub ams_repo: PathBuf,
    /// Base branch name
    pub base_branch: String,
    /// Report the plan without touching any repository
    pub dry_run: bool,
}

/// Run the register workflow (or report the plan under `--dry-run`).
pub async fn run_register(args: RunArgs) -> Result<()> {
    let bidders = parse_bidders(&args.bidders)?;
    if bidders.is_empty() {
        bail!("no bidders provided");
    }

    let targets = RepoTargets {
        prebid: resolve_repo(&args.prebid_repo)?,
        pubfig: resolve_repo(&args.pubfig_repo)?,
        ams: resolve_repo(&args.ams_repo)?,
    };

    let opts = RunOptions {
        bidders,
        targets,
        base_branch: args.base_branch,
    };

    if args.dry_run {
        report_dry_run(&opts);
        return Ok(());
    }

    let summary = execute_run(&opts, &CliProgress).await?;
    anstream::eprintln!("{} {}", check().for_stderr(), "done".success().for_stderr());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn resolve_repo(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("repository not found: {}", path.display()))
}

/// Report what a run would do without executing it.
fn report_dry_run(opts: &RunOptions) {
    let branch = branch_name(&opts.bidders);
    let list = opts.bidders.join(", ");

    println!("Dry run - no changes will be made");
    println!("Branch: {}", branch.accent());
    println!(
        "  - prebid-poc: register adapter entries for {} in {}",
        list.accent(),
        PREBID_MODULES_FILE
    );
    println!("  - pubfig-poc: sync the {PUBFIG_SUBMODULE_PATH} submodule to the new Prebid commit");
    println!(
        "  - ad-management-service-poc: register {} in {}",
        list.accent(),
        AMS_HELPER_FILE
    );
    println!(
        "Each repository with changes would be committed, pushed, and opened as a PR against {}.",
        opts.base_branch.accent()
    );
}
