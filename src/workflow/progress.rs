//! Progress callback trait for interface-agnostic updates

use crate::error::Error;
use crate::types::RepoRole;
use async_trait::async_trait;

/// Workflow phase within a single repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fetching, fast-forwarding the base, resetting the feature branch
    Preparing,
    /// Applying the repository-specific patch
    Patching,
    /// Checking the tree and committing/pushing if dirty
    Committing,
    /// Opening the pull request
    OpeningPr,
    /// Repository workflow finished
    Complete,
}

/// Progress callback trait
///
/// Implement this to receive updates while a run executes; the CLI prints
/// them to stderr so stdout stays reserved for the summary JSON.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when a repository's workflow starts
    async fn on_repo_started(&self, role: RepoRole);

    /// Called when a repository enters a new phase
    async fn on_phase(&self, role: RepoRole, phase: Phase);

    /// Called after the repository-specific patch ran
    async fn on_patch_applied(&self, role: RepoRole, changed: bool);

    /// Called when a PR was opened
    async fn on_pr_opened(&self, role: RepoRole, url: &str);

    /// Called with a general status message
    async fn on_message(&self, message: &str);

    /// Called when an error occurs, before it propagates
    async fn on_error(&self, error: &Error);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_repo_started(&self, _role: RepoRole) {}
    async fn on_phase(&self, _role: RepoRole, _phase: Phase) {}
    async fn on_patch_applied(&self, _role: RepoRole, _changed: bool) {}
    async fn on_pr_opened(&self, _role: RepoRole, _url: &str) {}
    async fn on_message(&self, _message: &str) {}
    async fn on_error(&self, _error: &Error) {}
}
