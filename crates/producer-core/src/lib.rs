//! Core traits, types, and error handling for producer.
//!
//! This crate provides the pieces shared by every hosting provider: the
//! provider contract, the repository collaborator, origin parsing and the
//! HTTP helper the providers talk through.

pub mod config;
pub mod error;
pub mod http;
pub mod origin;
pub mod provider;
pub mod repo;
pub mod types;

pub use error::{Error, Result};
pub use http::ApiClient;
pub use origin::RepoName;
pub use provider::{require_field, Provider};
pub use repo::Repo;
pub use types::Issue;
