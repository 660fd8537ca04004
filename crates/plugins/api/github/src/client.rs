//! GitHub API client implementation.

use async_trait::async_trait;
use producer_core::{require_field, ApiClient, Error, Issue, Provider, Repo, RepoName, Result};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::types::{CreateReleaseRequest, GitHubIssue};
use crate::{DEFAULT_GITHUB_URL, GITHUB_SSH_PREFIX};

/// GitHub API client.
pub struct GitHubApi {
    repo_name: RepoName,
    http: ApiClient,
}

impl GitHubApi {
    /// Create a GitHub client for the repository behind `origin`.
    pub fn new(origin: &str, username: &str, token: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_GITHUB_URL, origin, username, token)
    }

    /// Create a GitHub client against a custom API URL (GitHub Enterprise, tests).
    pub fn with_base_url(base_url: &str, origin: &str, username: &str, token: &str) -> Result<Self> {
        let repo_name = RepoName::parse(origin, GITHUB_SSH_PREFIX)?;
        let http = ApiClient::new(credentialed_url(base_url, username, token)?)?;

        debug!(repo = %repo_name, "Created GitHub client");

        Ok(Self { repo_name, http })
    }

    /// API base URL, including the embedded credentials.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

/// Embed `username:token` into the authority of `base_url`.
fn credentialed_url(base_url: &str, username: &str, token: &str) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid GitHub API URL '{}': {}", base_url, e)))?;

    url.set_username(username)
        .and_then(|_| url.set_password(Some(token)))
        .map_err(|_| Error::Config(format!("GitHub API URL '{}' cannot carry credentials", base_url)))?;

    Ok(url.to_string())
}

/// Whether `version` should be published as a prerelease.
///
/// Plain substring checks: any `0.x` version, or one mentioning
/// `dev`, `alpha` or `beta` anywhere.
pub fn is_prerelease(version: &str) -> bool {
    version.starts_with("0.")
        || version.contains("dev")
        || version.contains("alpha")
        || version.contains("beta")
}

fn map_issue(gh_issue: GitHubIssue) -> Issue {
    Issue {
        number: gh_issue.number,
        title: gh_issue.title,
        url: gh_issue.html_url,
    }
}

#[async_trait]
impl Provider for GitHubApi {
    fn name(&self) -> &'static str {
        "github"
    }

    fn repo_name(&self) -> &RepoName {
        &self.repo_name
    }

    async fn issues(&self) -> Result<Vec<Issue>> {
        let path = format!("/repos/{}/issues", self.repo_name);
        let gh_issues: Vec<GitHubIssue> = self
            .http
            .get(&path, &[("sort", "created"), ("direction", "asc")])
            .await?;

        debug!(count = gh_issues.len(), "Fetched GitHub issues");
        Ok(gh_issues.into_iter().map(map_issue).collect())
    }

    async fn release(&self, repo: &dyn Repo, version: &str) -> Result<()> {
        let request = CreateReleaseRequest {
            tag_name: version.to_string(),
            target_commitish: repo.branch()?,
            name: version.to_string(),
            body: repo.changelog()?,
            draft: false,
            prerelease: is_prerelease(version),
        };

        let path = format!("/repos/{}/releases", self.repo_name);
        let response: Value = self.http.post(&path, &[], &request).await?;

        if let Err(e) = require_field(&response, "id") {
            warn!(repo = %self.repo_name, version = version, "GitHub rejected the release");
            return Err(e);
        }

        info!(
            repo = %self.repo_name,
            version = version,
            prerelease = request.prerelease,
            "Created GitHub release"
        );
        repo.sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prerelease() {
        for version in ["0.1.0", "1.0.0-dev", "2.0.0alpha1", "3.0.0beta", "0.9.0"] {
            assert!(is_prerelease(version), "{} should be a prerelease", version);
        }
        for version in ["1.0.0", "2.3.4", "10.0.0", "1.0.0-RC1", "1.0.0-ALPHA"] {
            assert!(!is_prerelease(version), "{} should not be a prerelease", version);
        }
    }

    #[test]
    fn test_is_prerelease_matches_mid_word() {
        // Substring matching, not semver: "devops" contains "dev".
        assert!(is_prerelease("1.0.0-devops"));
        assert!(is_prerelease("2.0.0+alphabet"));
    }

    #[test]
    fn test_new_embeds_credentials() {
        let api = GitHubApi::new("git@github.com:acme/widget.git", "U", "T").unwrap();
        assert!(api.base_url().contains("U:T@api.github.com"));
        assert_eq!(api.repo_name().as_str(), "acme/widget");
        assert_eq!(api.name(), "github");
    }

    #[test]
    fn test_new_from_https_origin() {
        let api = GitHubApi::new("https://github.com/acme/widget.git", "U", "T").unwrap();
        assert_eq!(api.repo_name().as_str(), "acme/widget");
    }

    #[test]
    fn test_new_rejects_empty_origin() {
        let result = GitHubApi::new("https://github.com/", "U", "T");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_credentialed_url_rejects_garbage() {
        assert!(matches!(
            credentialed_url("not a url", "U", "T"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_map_issue() {
        let issue = map_issue(GitHubIssue {
            number: 42,
            title: "Crash on start".to_string(),
            html_url: "https://github.com/acme/widget/issues/42".to_string(),
        });
        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Crash on start");
        assert_eq!(issue.url, "https://github.com/acme/widget/issues/42");
    }

    // =========================================================================
    // Integration tests with httpmock
    // =========================================================================

    mod integration {
        use super::*;
        use httpmock::prelude::*;
        use mockall::mock;
        use serde_json::json;

        mock! {
            pub Repo {}

            impl Repo for Repo {
                fn branch(&self) -> Result<String>;
                fn changelog(&self) -> Result<String>;
                fn sync(&self) -> Result<()>;
            }
        }

        fn create_test_client(server: &MockServer) -> GitHubApi {
            GitHubApi::with_base_url(&server.base_url(), "git@github.com:acme/widget.git", "U", "T")
                .unwrap()
        }

        fn release_repo(sync_times: usize) -> MockRepo {
            let mut repo = MockRepo::new();
            repo.expect_branch().returning(|| Ok("main".to_string()));
            repo.expect_changelog()
                .returning(|| Ok("Initial release".to_string()));
            repo.expect_sync().times(sync_times).returning(|| Ok(()));
            repo
        }

        #[tokio::test]
        async fn test_issues() {
            let server = MockServer::start();

            let mock = server.mock(|when, then| {
                when.method(GET)
                    .path("/repos/acme/widget/issues")
                    .query_param("sort", "created")
                    .query_param("direction", "asc")
                    .header("Authorization", "Basic VTpU");
                then.status(200).json_body(json!([
                    {
                        "id": 1001,
                        "number": 3,
                        "title": "Oldest issue",
                        "state": "open",
                        "html_url": "https://github.com/acme/widget/issues/3",
                        "url": "https://api.github.com/repos/acme/widget/issues/3"
                    },
                    {
                        "id": 1002,
                        "number": 7,
                        "title": "Newer issue",
                        "state": "open",
                        "html_url": "https://github.com/acme/widget/issues/7",
                        "url": "https://api.github.com/repos/acme/widget/issues/7"
                    }
                ]));
            });

            let client = create_test_client(&server);
            let issues = client.issues().await.unwrap();

            mock.assert();
            assert_eq!(
                issues,
                vec![
                    Issue {
                        number: 3,
                        title: "Oldest issue".to_string(),
                        url: "https://github.com/acme/widget/issues/3".to_string(),
                    },
                    Issue {
                        number: 7,
                        title: "Newer issue".to_string(),
                        url: "https://github.com/acme/widget/issues/7".to_string(),
                    },
                ]
            );
        }

        #[tokio::test]
        async fn test_issues_empty() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(GET).path("/repos/acme/widget/issues");
                then.status(200).json_body(json!([]));
            });

            let client = create_test_client(&server);
            let issues = client.issues().await.unwrap();

            assert!(issues.is_empty());
        }

        #[tokio::test]
        async fn test_issues_transport_error() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(GET).path("/repos/acme/widget/issues");
                then.status(500).body("boom");
            });

            let client = create_test_client(&server);
            let err = client.issues().await.unwrap_err();

            assert!(err.is_transport());
        }

        #[tokio::test]
        async fn test_release_prerelease() {
            let server = MockServer::start();

            let mock = server.mock(|when, then| {
                when.method(POST)
                    .path("/repos/acme/widget/releases")
                    .header("Authorization", "Basic VTpU")
                    .json_body(json!({
                        "tag_name": "0.9.0",
                        "target_commitish": "main",
                        "name": "0.9.0",
                        "body": "Initial release",
                        "draft": false,
                        "prerelease": true
                    }));
                then.status(201).json_body(json!({"id": 123, "tag_name": "0.9.0"}));
            });

            let client = create_test_client(&server);
            let repo = release_repo(1);
            client.release(&repo, "0.9.0").await.unwrap();

            mock.assert();
        }

        #[tokio::test]
        async fn test_release_stable() {
            let server = MockServer::start();

            let mock = server.mock(|when, then| {
                when.method(POST)
                    .path("/repos/acme/widget/releases")
                    .body_includes("\"prerelease\":false")
                    .body_includes("\"tag_name\":\"1.2.0\"");
                then.status(201).json_body(json!({"id": 456}));
            });

            let client = create_test_client(&server);
            let repo = release_repo(1);
            client.release(&repo, "1.2.0").await.unwrap();

            mock.assert();
        }

        #[tokio::test]
        async fn test_release_without_id_is_api_error() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(POST).path("/repos/acme/widget/releases");
                then.status(200).json_body(json!({"message": "Validation failed"}));
            });

            let client = create_test_client(&server);
            let repo = release_repo(0);
            let err = client.release(&repo, "1.0.0").await.unwrap_err();

            match err {
                Error::Api(message) => assert!(message.contains("Validation failed")),
                other => panic!("expected API error, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_release_empty_response_is_api_error() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(POST).path("/repos/acme/widget/releases");
                then.status(201).json_body(json!({}));
            });

            let client = create_test_client(&server);
            let repo = release_repo(0);
            let result = client.release(&repo, "0.9.0").await;

            assert!(matches!(result, Err(Error::Api(_))));
        }

        #[tokio::test]
        async fn test_release_rejected_status_skips_sync() {
            let server = MockServer::start();

            server.mock(|when, then| {
                when.method(POST).path("/repos/acme/widget/releases");
                then.status(422)
                    .json_body(json!({"message": "Validation failed"}));
            });

            let client = create_test_client(&server);
            let repo = release_repo(0);
            let err = client.release(&repo, "1.0.0").await.unwrap_err();

            assert!(matches!(err, Error::Status { status: 422, .. }));
        }

        #[tokio::test]
        async fn test_release_repo_error_sends_nothing() {
            let server = MockServer::start();

            let mock = server.mock(|when, then| {
                when.method(POST).path("/repos/acme/widget/releases");
                then.status(201).json_body(json!({"id": 1}));
            });

            let mut repo = MockRepo::new();
            repo.expect_branch()
                .returning(|| Err(Error::Repo("detached HEAD".to_string())));
            repo.expect_changelog().times(0);
            repo.expect_sync().times(0);

            let client = create_test_client(&server);
            let err = client.release(&repo, "1.0.0").await.unwrap_err();

            assert!(matches!(err, Error::Repo(_)));
            mock.assert_calls(0);
        }
    }
}
