//! GitHub API request and response types.
//!
//! Only the fields producer reads or sends are modelled; everything else in
//! the JSON is ignored.

use serde::{Deserialize, Serialize};

/// GitHub issue representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

/// Request body for creating a release.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReleaseRequest {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}
