//! GitLab provider implementation for producer.
//!
//! This crate lists open issues and creates release tags through the
//! GitLab REST API (v3).

mod client;
mod types;

pub use client::GitLabApi;
pub use types::*;

/// Default GitLab API URL.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com/api/v3";

/// Web URL issue links are built from.
pub const GITLAB_WEB_URL: &str = "https://gitlab.com";

/// Prefix of GitLab SSH origins.
pub const GITLAB_SSH_PREFIX: &str = "git@gitlab.com:";
