//! Local git checkout backing releases.

use std::path::{Path, PathBuf};
use std::process::Command;

use producer_core::{Error, Repo, Result};
use tracing::{debug, info};

/// A git working tree, driven through the `git` binary.
pub struct GitRepo {
    root: PathBuf,
    changelog: String,
}

impl GitRepo {
    /// Open the repository containing `dir`.
    ///
    /// `changelog` is the release notes file, relative to the repository root.
    pub fn open(dir: impl AsRef<Path>, changelog: impl Into<String>) -> Result<Self> {
        let root = run_git(dir.as_ref(), &["rev-parse", "--show-toplevel"])?;
        debug!(root = %root, "Opened git repository");

        Ok(Self {
            root: PathBuf::from(root),
            changelog: changelog.into(),
        })
    }

    /// Repository root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL of the `origin` remote.
    pub fn origin(&self) -> Result<String> {
        self.git(&["config", "--get", "remote.origin.url"])
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        run_git(&self.root, args)
    }
}

impl Repo for GitRepo {
    fn branch(&self) -> Result<String> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn changelog(&self) -> Result<String> {
        let path = self.root.join(&self.changelog);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Repo(format!("Failed to read {}: {}", path.display(), e)))?;

        if contents.trim().is_empty() {
            return Err(Error::Repo(format!("{} is empty", path.display())));
        }
        Ok(contents)
    }

    fn sync(&self) -> Result<()> {
        self.git(&["pull"])?;
        self.git(&["fetch", "--tags"])?;
        info!(root = %self.root.display(), "Synced with remote");
        Ok(())
    }
}

/// Run git in `dir` and return its trimmed stdout.
fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    debug!(args = ?args, "Running git");

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::Repo(format!("Failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Repo(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
