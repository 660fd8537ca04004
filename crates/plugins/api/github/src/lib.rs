//! GitHub provider implementation for producer.
//!
//! This crate lists open issues and publishes releases through the
//! GitHub REST API.

mod client;
mod types;

pub use client::{is_prerelease, GitHubApi};
pub use types::*;

/// Default GitHub API URL.
pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";

/// Prefix of GitHub SSH origins.
pub const GITHUB_SSH_PREFIX: &str = "git@github.com:";
