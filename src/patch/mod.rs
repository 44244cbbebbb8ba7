//! Idempotent text patchers for the target artifacts
//!
//! Each patcher reports whether the file content actually changed; the
//! workflow uses that to decide whether a commit is needed at all.

mod manifest;
mod source_array;

pub use manifest::{ensure_manifest_member, update_prebid_modules};
pub use source_array::{ensure_source_array_members, update_ams_helper};
