//! Workflow execution
//!
//! One run walks the repositories in a fixed order: prebid first (its
//! post-commit `HEAD` feeds the submodule sync), then pubfig, then the
//! ad-management service. There is no partial-success mode: any failure
//! aborts the run, and branches or PRs already created in earlier
//! repositories are left as-is.

use crate::auth::{AuthStatus, ensure_hosting_auth};
use crate::bidders::branch_name;
use crate::error::Result;
use crate::patch::{update_ams_helper, update_prebid_modules};
use crate::platform::open_pr;
use crate::repo::GitWorkspace;
use crate::types::{PUBFIG_SUBMODULE_PATH, RepoReport, RepoRole, RepoTargets, RunSummary};
use crate::workflow::{Phase, ProgressCallback};

/// Options for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Bidder slugs as parsed, order and duplicates preserved
    pub bidders: Vec<String>,
    /// The three target working trees
    pub targets: RepoTargets,
    /// Base branch the feature branch forks from
    pub base_branch: String,
}

/// Execute a full run across the three repositories.
pub async fn execute_run(
    opts: &RunOptions,
    progress: &dyn ProgressCallback,
) -> Result<RunSummary> {
    match run_inner(opts, progress).await {
        Ok(summary) => Ok(summary),
        Err(err) => {
            progress.on_error(&err).await;
            Err(err)
        }
    }
}

#[allow(clippy::too_many_lines)]
async fn run_inner(opts: &RunOptions, progress: &dyn ProgressCallback) -> Result<RunSummary> {
    let branch = branch_name(&opts.bidders);
    let list = opts.bidders.join(", ");
    progress.on_message(&format!("Branch: {branch}")).await;

    match ensure_hosting_auth().await? {
        AuthStatus::AlreadyAuthenticated => {}
        AuthStatus::LoggedIn => progress.on_message("Logged in to gh with env token").await,
        AuthStatus::NoToken => {
            progress
                .on_message("No GH_TOKEN/GITHUB_TOKEN set; relying on existing gh credentials")
                .await;
        }
    }

    // prebid: register <bidder>BidAdapter entries in modules.json
    let prebid = GitWorkspace::new(&opts.targets.prebid);
    progress.on_repo_started(RepoRole::Prebid).await;
    progress.on_phase(RepoRole::Prebid, Phase::Preparing).await;
    prebid.prepare_branch(&opts.base_branch, &branch).await?;
    progress.on_phase(RepoRole::Prebid, Phase::Patching).await;
    let prebid_changed = update_prebid_modules(prebid.root(), &opts.bidders)?;
    progress
        .on_patch_applied(RepoRole::Prebid, prebid_changed)
        .await;
    let title = format!("chore: add bidders {list} to Prebid modules.json");
    let pr = commit_and_open_pr(
        &prebid,
        RepoRole::Prebid,
        &branch,
        &opts.base_branch,
        &title,
        "Automated POC change to include new bidders in Prebid build modules.",
        progress,
    )
    .await?;
    let prebid_report = RepoReport {
        changed: prebid_changed,
        pr,
        prebid_sha: None,
    };

    // the submodule pointer targets whatever the prebid branch now points at
    let prebid_sha = prebid.rev_parse_head().await?;

    // pubfig: move the pbjs-poc submodule pointer
    let pubfig = GitWorkspace::new(&opts.targets.pubfig);
    progress.on_repo_started(RepoRole::Pubfig).await;
    progress.on_phase(RepoRole::Pubfig, Phase::Preparing).await;
    pubfig.prepare_branch(&opts.base_branch, &branch).await?;
    progress.on_phase(RepoRole::Pubfig, Phase::Patching).await;
    let submodule_changed = pubfig
        .sync_submodule(PUBFIG_SUBMODULE_PATH, &prebid_sha)
        .await?;
    progress
        .on_patch_applied(RepoRole::Pubfig, submodule_changed)
        .await;
    let short_sha = prebid_sha.get(..7).unwrap_or(prebid_sha.as_str());
    let title = format!("chore: sync {PUBFIG_SUBMODULE_PATH} submodule to {short_sha}");
    let pr = commit_and_open_pr(
        &pubfig,
        RepoRole::Pubfig,
        &branch,
        &opts.base_branch,
        &title,
        "Automated POC change to sync Prebid submodule to latest modules.json changes.",
        progress,
    )
    .await?;
    let pubfig_report = RepoReport {
        changed: submodule_changed,
        pr,
        prebid_sha: Some(prebid_sha),
    };

    // ad-management service: register the raw slugs in the helper array
    let ams = GitWorkspace::new(&opts.targets.ams);
    progress.on_repo_started(RepoRole::AdManagement).await;
    progress
        .on_phase(RepoRole::AdManagement, Phase::Preparing)
        .await;
    ams.prepare_branch(&opts.base_branch, &branch).await?;
    progress
        .on_phase(RepoRole::AdManagement, Phase::Patching)
        .await;
    let ams_changed = update_ams_helper(ams.root(), &opts.bidders)?;
    progress
        .on_patch_applied(RepoRole::AdManagement, ams_changed)
        .await;
    let title = format!("chore: add bidders {list} to PrebidModulesHelper");
    let pr = commit_and_open_pr(
        &ams,
        RepoRole::AdManagement,
        &branch,
        &opts.base_branch,
        &title,
        "Automated POC change to include new bidder slugs in AMS helper.",
        progress,
    )
    .await?;
    let ams_report = RepoReport {
        changed: ams_changed,
        pr,
        prebid_sha: None,
    };

    Ok(RunSummary {
        prebid: prebid_report,
        pubfig: pubfig_report,
        ad_management: ams_report,
    })
}

/// Commit and push if the tree is dirty, then open the PR.
///
/// Returns the PR URL, or an empty string when the tree was clean and the
/// commit/push/PR sequence was skipped entirely.
async fn commit_and_open_pr(
    repo: &GitWorkspace,
    role: RepoRole,
    branch: &str,
    base: &str,
    title: &str,
    body: &str,
    progress: &dyn ProgressCallback,
) -> Result<String> {
    progress.on_phase(role, Phase::Committing).await;
    if !repo.is_dirty().await? {
        progress
            .on_message("  working tree clean, skipping commit and PR")
            .await;
        progress.on_phase(role, Phase::Complete).await;
        return Ok(String::new());
    }

    repo.stage_all().await?;
    repo.commit(title).await?;
    repo.push_upstream(branch).await?;

    progress.on_phase(role, Phase::OpeningPr).await;
    let url = open_pr(repo.root(), title, body, base, branch).await?;
    progress.on_pr_opened(role, &url).await;
    progress.on_phase(role, Phase::Complete).await;
    Ok(url)
}
