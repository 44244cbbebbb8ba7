//! CLI commands
//!
//! Command implementations for the `bidsync` binary.

mod auth;
mod progress;
mod run;
mod style;

pub use auth::run_auth;
pub use run::{RunArgs, run_register};
