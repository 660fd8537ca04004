//! Repository identifiers derived from git remote origins.
//!
//! Both hosting providers address a repository by its `owner/repo` path.
//! The path is recovered from either form of git remote:
//!
//! - HTTPS: `https://github.com/acme/widget.git`
//! - SSH shorthand: `git@github.com:acme/widget.git`

use std::fmt;

use url::Url;

use crate::{Error, Result};

/// Suffix git hosts append to clone URLs.
const GIT_SUFFIX: &str = ".git";

/// Canonical `owner/repo` identifier of a hosted repository.
///
/// Never empty, never wrapped in `/`, never ending in `.git`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(String);

impl RepoName {
    /// Derive the identifier from a remote origin.
    ///
    /// The origin is read as an HTTPS URL first. If it starts with
    /// `ssh_prefix` (e.g. `git@github.com:`) everything after the prefix
    /// is used instead.
    pub fn parse(origin: &str, ssh_prefix: &str) -> Result<Self> {
        let origin = origin.trim();

        let path = match origin.strip_prefix(ssh_prefix) {
            Some(rest) if !ssh_prefix.is_empty() => rest.to_string(),
            _ => https_path(origin),
        };

        let name = strip_decorations(&path);
        if name.is_empty() {
            return Err(Error::Config(format!(
                "Could not derive a repository name from origin '{}'",
                origin
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// The `owner/repo` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Owner (user, organization or top-level group).
    pub fn owner(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(owner, _)| owner)
    }

    /// Everything after the owner, or the whole identifier when there is no owner.
    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(_, name)| name)
    }

    /// Form-encoded identifier for use as a single path segment (`acme%2Fwidget`).
    pub fn url_encoded(&self) -> String {
        url::form_urlencoded::byte_serialize(self.0.as_bytes()).collect()
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Path component of an HTTPS origin, or the origin itself when it is not a URL.
fn https_path(origin: &str) -> String {
    match Url::parse(origin) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => origin.to_string(),
    }
}

/// Strip `.git` suffixes and surrounding slashes until neither remains.
fn strip_decorations(path: &str) -> &str {
    let mut current = path;
    loop {
        let trimmed = current.trim_matches('/');
        let trimmed = trimmed.strip_suffix(GIT_SUFFIX).unwrap_or(trimmed);
        if trimmed == current {
            return current;
        }
        current = trimmed;
    }
}
