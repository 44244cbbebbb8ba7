//! Core types for bidsync

use serde::Serialize;
use std::path::PathBuf;

/// Relative path of the Prebid build manifest inside the prebid repo.
pub const PREBID_MODULES_FILE: &str = "modules.json";

/// Relative path of the generated helper source inside the AMS repo.
pub const AMS_HELPER_FILE: &str =
    "src/main/java/io/freestar/admanagement/deployments/utils/PrebidModulesHelper.java";

/// Declared name of the helper's bid-adapter slug array.
pub const AMS_HELPER_ARRAY: &str = "NETWORK_SLUGS_WITH_BID_ADAPTERS";

/// Relative path of the Prebid submodule inside the pubfig repo.
pub const PUBFIG_SUBMODULE_PATH: &str = "pbjs-poc";

/// The three repositories a run touches, in workflow order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoRole {
    /// Prebid.js build checkout (owns `modules.json`)
    Prebid,
    /// Publisher wrapper checkout (owns the `pbjs-poc` submodule pointer)
    Pubfig,
    /// Ad-management service checkout (owns the helper array)
    AdManagement,
}

impl RepoRole {
    /// Fixed key for this repository in the run summary
    pub const fn key(self) -> &'static str {
        match self {
            Self::Prebid => "prebid-poc",
            Self::Pubfig => "pubfig-poc",
            Self::AdManagement => "ad-management-service-poc",
        }
    }
}

/// Filesystem locations of the three target working trees
#[derive(Debug, Clone)]
pub struct RepoTargets {
    /// Prebid.js checkout
    pub prebid: PathBuf,
    /// pubfig checkout
    pub pubfig: PathBuf,
    /// ad-management-service checkout
    pub ams: PathBuf,
}

/// Per-repository outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RepoReport {
    /// Whether the target artifact changed
    pub changed: bool,
    /// URL of the opened pull request, empty when the tree was clean
    pub pr: String,
    /// Prebid commit the submodule was synced to (pubfig entry only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebid_sha: Option<String>,
}

/// Summary of a full run, printed as JSON on stdout
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Outcome for the Prebid.js repository
    #[serde(rename = "prebid-poc")]
    pub prebid: RepoReport,
    /// Outcome for the pubfig repository
    #[serde(rename = "pubfig-poc")]
    pub pubfig: RepoReport,
    /// Outcome for the ad-management-service repository
    #[serde(rename = "ad-management-service-poc")]
    pub ad_management: RepoReport,
}
