//! CLI progress callback with styled output
//!
//! Everything goes to stderr: stdout is reserved for the summary JSON so
//! the output stays machine-parseable.

use crate::cli::style::{Stylize, check, cross};
use anstream::eprintln;
use async_trait::async_trait;
use bidsync::error::Error;
use bidsync::types::RepoRole;
use bidsync::workflow::{Phase, ProgressCallback};

/// Prints workflow progress to stderr
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_repo_started(&self, role: RepoRole) {
        eprintln!("{}", role.key().emphasis().for_stderr());
    }

    async fn on_phase(&self, _role: RepoRole, phase: Phase) {
        match phase {
            Phase::Preparing => eprintln!("  preparing branch..."),
            Phase::Patching => eprintln!("  applying patch..."),
            Phase::Committing => eprintln!("  checking working tree..."),
            Phase::OpeningPr => eprintln!("  opening pull request..."),
            Phase::Complete => {}
        }
    }

    async fn on_patch_applied(&self, _role: RepoRole, changed: bool) {
        if changed {
            eprintln!("  {} patched", check().for_stderr());
        } else {
            eprintln!("  {}", "already up to date".muted().for_stderr());
        }
    }

    async fn on_pr_opened(&self, _role: RepoRole, url: &str) {
        eprintln!("  {} {}", check().for_stderr(), url.accent().for_stderr());
    }

    async fn on_message(&self, message: &str) {
        eprintln!("{message}");
    }

    async fn on_error(&self, error: &Error) {
        eprintln!("{} {}", cross(), error.to_string().error());
    }
}
