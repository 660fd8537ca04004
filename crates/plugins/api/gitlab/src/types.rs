//! GitLab API request and response types.
//!
//! These mirror the GitLab REST API v3 payloads producer touches.

use serde::{Deserialize, Serialize};

/// GitLab issue representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabIssue {
    /// Project-local issue number
    pub iid: u64,
    pub title: String,
}

/// Request body for creating a tag with release notes.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagRequest {
    /// Project path (`owner/repo`)
    pub id: String,
    pub tag_name: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub release_description: String,
}
