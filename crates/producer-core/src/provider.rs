//! Provider trait for git hosting services.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::origin::RepoName;
use crate::repo::Repo;
use crate::types::Issue;

/// Trait for git hosting providers (GitHub, GitLab).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "github", "gitlab")
    fn name(&self) -> &'static str;

    /// Repository this provider instance talks to
    fn repo_name(&self) -> &RepoName;

    /// Open issues, oldest first, from a single page of results.
    async fn issues(&self) -> Result<Vec<Issue>>;

    /// Publish `version` as a tagged release and sync `repo` on success.
    ///
    /// `repo.sync()` is never called when the release is rejected.
    async fn release(&self, repo: &dyn Repo, version: &str) -> Result<()>;
}

/// Check that a release response carries its success marker field.
///
/// A missing or null `field` is an [`Error::Api`] whose message is the
/// pretty-printed response body.
pub fn require_field(response: &Value, field: &str) -> Result<()> {
    match response.get(field) {
        Some(value) if !value.is_null() => Ok(()),
        _ => {
            let body = serde_json::to_string_pretty(response)?;
            Err(Error::Api(body))
        }
    }
}
