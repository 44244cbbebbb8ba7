//! bidsync - cross-repository bidder registration
//!
//! Library crate backing the `bidsync` binary. Patches the Prebid build
//! manifest, the AMS helper array, and the pubfig submodule pointer, then
//! drives the shared branch/commit/PR workflow in each repository.

pub mod auth;
pub mod bidders;
pub mod error;
pub mod exec;
pub mod patch;
pub mod platform;
pub mod repo;
pub mod types;
pub mod workflow;
