//! Error types for bidsync
//!
//! Every failure is fatal to the run: nothing is caught and recovered
//! internally, errors propagate to `main` with their diagnostic context.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by bidsync
#[derive(Debug, Error)]
pub enum Error {
    /// An external process exited nonzero
    #[error("command `{command}` failed in {cwd} with exit code {exit_code}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Working directory the command ran in
        cwd: String,
        /// Process exit code (-1 if terminated by signal)
        exit_code: i32,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// An expected file is absent
    #[error("missing file: {}", .0.display())]
    MissingFile(PathBuf),

    /// A structural marker was not found in a source file
    #[error("could not locate {} in {}", .what, .file.display())]
    PatternNotFound {
        /// File that was searched
        file: PathBuf,
        /// Description of the missing marker
        what: String,
    },

    /// Bidder list looked like a JSON array but failed to parse
    #[error("malformed bidder list: {0}")]
    MalformedBidderList(serde_json::Error),

    /// Non-strict manifest with more than one top-level array; refusing to
    /// guess which bracket closes the module list
    #[error("ambiguous manifest (multiple top-level arrays): {}", .0.display())]
    AmbiguousManifest(PathBuf),

    /// Hosting CLI login failed
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A patch pattern failed to compile
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
