//! GitLab API client implementation.

use async_trait::async_trait;
use producer_core::{require_field, ApiClient, Issue, Provider, Repo, RepoName, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::types::{CreateTagRequest, GitLabIssue};
use crate::{DEFAULT_GITLAB_URL, GITLAB_SSH_PREFIX, GITLAB_WEB_URL};

/// GitLab API client.
///
/// Authenticates by appending `private_token` to every request's query.
pub struct GitLabApi {
    repo_name: RepoName,
    http: ApiClient,
}

impl GitLabApi {
    /// Create a GitLab client for the repository behind `origin`.
    pub fn new(origin: &str, token: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_GITLAB_URL, origin, token)
    }

    /// Create a GitLab client with a custom API URL.
    pub fn with_base_url(base_url: &str, origin: &str, token: &str) -> Result<Self> {
        let repo_name = RepoName::parse(origin, GITLAB_SSH_PREFIX)?;
        let http = ApiClient::new(base_url)?.with_persistent_query("private_token", token);

        debug!(repo = %repo_name, "Created GitLab client");

        Ok(Self { repo_name, http })
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Get the project API path for a given endpoint.
    fn project_path(&self, endpoint: &str) -> String {
        format!("/projects/{}{}", self.repo_name.url_encoded(), endpoint)
    }

    fn map_issue(&self, gl_issue: GitLabIssue) -> Issue {
        Issue {
            url: format!(
                "{}/{}/issues/{}",
                GITLAB_WEB_URL, self.repo_name, gl_issue.iid
            ),
            number: gl_issue.iid,
            title: gl_issue.title,
        }
    }
}

#[async_trait]
impl Provider for GitLabApi {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    fn repo_name(&self) -> &RepoName {
        &self.repo_name
    }

    async fn issues(&self) -> Result<Vec<Issue>> {
        let gl_issues: Vec<GitLabIssue> = self
            .http
            .get(&self.project_path("/issues"), &[("sort", "asc")])
            .await?;

        debug!(count = gl_issues.len(), "Fetched GitLab issues");
        Ok(gl_issues
            .into_iter()
            .map(|issue| self.map_issue(issue))
            .collect())
    }

    async fn release(&self, repo: &dyn Repo, version: &str) -> Result<()> {
        let request = CreateTagRequest {
            id: self.repo_name.to_string(),
            tag_name: version.to_string(),
            ref_name: repo.branch()?,
            release_description: repo.changelog()?,
        };

        let response: Value = self
            .http
            .post(&self.project_path("/repository/tags"), &[], &request)
            .await?;

        if let Err(e) = require_field(&response, "name") {
            warn!(repo = %self.repo_name, version = version, "GitLab rejected the tag");
            return Err(e);
        }

        info!(repo = %self.repo_name, version = version, "Created GitLab release tag");
        repo.sync()
    }
}
