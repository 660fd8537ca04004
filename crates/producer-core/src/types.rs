//! Common types used across providers.

use serde::{Deserialize, Serialize};

/// An open issue, normalized across hosting services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Project-local issue number (`number` on GitHub, `iid` on GitLab)
    pub number: u64,
    pub title: String,
    /// Browser URL of the issue
    pub url: String,
}
