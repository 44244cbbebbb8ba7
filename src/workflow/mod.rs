//! Repository workflow engine
//!
//! Drives the shared branch/commit/PR sequence across the three target
//! repositories, strictly sequentially: prepare a branch, apply the
//! repository-specific patch, commit and push when the tree is dirty, open
//! a pull request.

mod execute;
mod progress;

pub use execute::{RunOptions, execute_run};
pub use progress::{NoopProgress, Phase, ProgressCallback};
