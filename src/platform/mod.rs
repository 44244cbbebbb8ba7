//! Code-hosting operations via the `gh` CLI
//!
//! PR creation shells out to `gh`; the PR URL is then resolved with a
//! follow-up `gh pr view` query instead of being parsed from the creation
//! output, which varies between CLI versions.

use crate::error::Result;
use crate::exec::Cmd;
use std::path::Path;

/// Open a pull request for `head` against `base` in the repository at
/// `repo`, returning its web URL.
pub async fn open_pr(
    repo: &Path,
    title: &str,
    body: &str,
    base: &str,
    head: &str,
) -> Result<String> {
    Cmd::new("gh")
        .args([
            "pr", "create", "--title", title, "--body", body, "--base", base, "--head", head,
        ])
        .current_dir(repo)
        .run()
        .await?;

    let view = Cmd::new("gh")
        .args(["pr", "view", "--json", "url", "--jq", ".url"])
        .current_dir(repo)
        .run()
        .await?;
    Ok(view.stdout.trim().to_string())
}
