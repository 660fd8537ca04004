//! The local repository a release is cut from.

use crate::Result;

/// Version-control metadata a provider needs to publish a release.
///
/// Implemented by the surrounding tool (see `GitRepo` in the CLI); providers
/// only read from it and signal back through [`Repo::sync`].
pub trait Repo: Send + Sync {
    /// Branch the release tag should point at.
    fn branch(&self) -> Result<String>;

    /// Release notes for the version being published.
    fn changelog(&self) -> Result<String>;

    /// Called once the remote release exists, so the local clone can pick it up.
    fn sync(&self) -> Result<()>;
}
