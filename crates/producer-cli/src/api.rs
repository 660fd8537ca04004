//! Provider selection by origin host.

use async_trait::async_trait;
use producer_core::config::Config;
use producer_core::{Error, Issue, Provider, Repo, RepoName, Result};
use producer_github::GitHubApi;
use producer_gitlab::GitLabApi;
use tracing::debug;
use url::Url;

/// The hosting provider an origin belongs to.
pub enum ApiProvider {
    GitHub(GitHubApi),
    GitLab(GitLabApi),
}

impl ApiProvider {
    /// Pick and construct the provider for `origin` using credentials from `config`.
    pub fn from_origin(origin: &str, config: &Config) -> Result<Self> {
        let host = origin_host(origin);

        if host.as_deref() == Some("github.com") {
            let github = config
                .github
                .as_ref()
                .filter(|c| !c.username.is_empty() && !c.token.is_empty())
                .ok_or_else(|| {
                    Error::Config(
                        "GitHub credentials missing. Set github.username and github.token \
                         or GITHUB_USERNAME and GITHUB_TOKEN"
                            .to_string(),
                    )
                })?;
            debug!(origin = origin, "Selected GitHub provider");
            return Ok(Self::GitHub(GitHubApi::new(
                origin,
                &github.username,
                &github.token,
            )?));
        }

        if host.as_deref() == Some("gitlab.com") {
            let gitlab = config
                .gitlab
                .as_ref()
                .filter(|c| !c.token.is_empty())
                .ok_or_else(|| {
                    Error::Config(
                        "GitLab token missing. Set gitlab.token or GITLAB_TOKEN".to_string(),
                    )
                })?;
            debug!(origin = origin, "Selected GitLab provider");
            return Ok(Self::GitLab(GitLabApi::new(origin, &gitlab.token)?));
        }

        Err(Error::Config(format!(
            "Origin '{}' is neither a GitHub nor a GitLab repository",
            origin
        )))
    }

    fn inner(&self) -> &dyn Provider {
        match self {
            Self::GitHub(api) => api,
            Self::GitLab(api) => api,
        }
    }
}

/// Host of a URL origin (`https://host/...`, `ssh://git@host/...`) or of an
/// scp-style origin (`git@host:owner/repo`).
fn origin_host(origin: &str) -> Option<String> {
    let origin = origin.trim();

    if let Some(host) = Url::parse(origin).ok().and_then(|url| url.host_str().map(str::to_string)) {
        return Some(host.to_ascii_lowercase());
    }

    let (authority, _) = origin.split_once(':')?;
    if authority.contains('/') {
        return None;
    }
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

#[async_trait]
impl Provider for ApiProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn repo_name(&self) -> &RepoName {
        self.inner().repo_name()
    }

    async fn issues(&self) -> Result<Vec<Issue>> {
        self.inner().issues().await
    }

    async fn release(&self, repo: &dyn Repo, version: &str) -> Result<()> {
        self.inner().release(repo, version).await
    }
}
