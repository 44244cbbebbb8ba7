//! Git working-tree operations
//!
//! Thin wrapper over the `git` CLI for the local operations the workflow
//! needs: branch preparation, dirty checks, commit/push, and submodule
//! pointer sync. All invocations go through [`Cmd`].

use crate::error::Result;
use crate::exec::Cmd;
use std::path::{Path, PathBuf};

/// Handle on a local git working tree
#[derive(Debug, Clone)]
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Wrap the working tree rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the working tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn git(&self) -> Cmd {
        Cmd::new("git").current_dir(&self.root)
    }

    /// Fetch all refs from `origin`
    pub async fn fetch_origin(&self) -> Result<()> {
        self.git().args(["fetch", "origin"]).run().await?;
        Ok(())
    }

    /// Check out an existing branch
    pub async fn checkout(&self, branch: &str) -> Result<()> {
        self.git().args(["checkout", branch]).run().await?;
        Ok(())
    }

    /// Fast-forward the current branch from `origin`
    pub async fn pull_ff_only(&self, branch: &str) -> Result<()> {
        self.git()
            .args(["pull", "--ff-only", "origin", branch])
            .run()
            .await?;
        Ok(())
    }

    /// Create `branch` at the current tip, or reset it there if it exists
    pub async fn reset_branch(&self, branch: &str) -> Result<()> {
        self.git().args(["checkout", "-B", branch]).run().await?;
        Ok(())
    }

    /// Prepare the shared feature branch: fetch, check out the base,
    /// fast-forward it, then create-or-reset the branch at its tip.
    ///
    /// The force-reset makes repeated runs on the same bidder set resumable.
    pub async fn prepare_branch(&self, base: &str, branch: &str) -> Result<()> {
        self.fetch_origin().await?;
        self.checkout(base).await?;
        self.pull_ff_only(base).await?;
        self.reset_branch(branch).await?;
        Ok(())
    }

    /// `git status --porcelain` output
    pub async fn status_porcelain(&self) -> Result<String> {
        let out = self.git().args(["status", "--porcelain"]).run().await?;
        Ok(out.stdout)
    }

    /// Whether the working tree has staged or unstaged changes
    pub async fn is_dirty(&self) -> Result<bool> {
        Ok(!self.status_porcelain().await?.trim().is_empty())
    }

    /// Stage everything
    pub async fn stage_all(&self) -> Result<()> {
        self.git().args(["add", "-A"]).run().await?;
        Ok(())
    }

    /// Commit the staged tree
    pub async fn commit(&self, message: &str) -> Result<()> {
        self.git().args(["commit", "-m", message]).run().await?;
        Ok(())
    }

    /// Push the branch to `origin`, setting the upstream
    pub async fn push_upstream(&self, branch: &str) -> Result<()> {
        self.git()
            .args(["push", "-u", "origin", branch])
            .run()
            .await?;
        Ok(())
    }

    /// Commit id of `HEAD`
    pub async fn rev_parse_head(&self) -> Result<String> {
        let out = self.git().args(["rev-parse", "HEAD"]).run().await?;
        Ok(out.stdout.trim().to_string())
    }

    /// Point the submodule at `submodule_path` to `target_commit` and stage
    /// the pointer change. Reports whether the pointer actually moved.
    ///
    /// A repository without a `.gitmodules` descriptor is a no-op; no git
    /// command is spawned. This does not commit.
    pub async fn sync_submodule(
        &self,
        submodule_path: &str,
        target_commit: &str,
    ) -> Result<bool> {
        if !self.root.join(".gitmodules").exists() {
            return Ok(false);
        }
        self.git()
            .args(["submodule", "update", "--init", submodule_path])
            .run()
            .await?;
        self.git()
            .args(["-C", submodule_path, "fetch", "--all"])
            .run()
            .await?;
        self.git()
            .args(["-C", submodule_path, "checkout", target_commit])
            .run()
            .await?;
        self.git().args(["add", submodule_path]).run().await?;
        self.is_dirty().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_submodule_without_gitmodules_is_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = GitWorkspace::new(dir.path());
        // not even a git repository; the descriptor check must short-circuit
        // before any command is spawned
        let changed = repo
            .sync_submodule("pbjs-poc", "0123456789abcdef0123456789abcdef01234567")
            .await
            .expect("sync");
        assert!(!changed);
    }
}
