//! Local checkout inspection.

use anyhow::{Context, Result};
use gix::bstr::ByteSlice;
use std::path::Path;
use tracing::debug;

use crate::link::RepositoryDescriptor;

/// Default remote consulted for the repository URL.
pub const DEFAULT_REMOTE: &str = "origin";

/// Remote and HEAD state of a local checkout.
#[derive(Debug, Clone)]
pub struct Checkout {
    descriptor: RepositoryDescriptor,
    remote: String,
    head: Option<String>,
}

impl Checkout {
    /// Remote URL with the default URL pattern.
    pub fn descriptor(&self) -> &RepositoryDescriptor {
        &self.descriptor
    }

    /// Consumes checkout, returning its descriptor.
    pub fn into_descriptor(self) -> RepositoryDescriptor {
        self.descriptor
    }

    /// Remote name the URL was read from.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Full HEAD commit hash.
    ///
    /// None for a repository without commits.
    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }
}

/// Reads remote URL and HEAD commit from a local git repository.
///
/// The URL is taken as configured (after `url.<base>.insteadOf` rewrites),
/// keeping SSH shorthand forms intact for link resolution.
///
/// # Arguments
///
/// * `repo_path`: Path to git repository or worktree
/// * `remote`: Remote name, usually `origin`
///
/// # Errors
///
/// Returns error if the repository cannot be opened, the remote does not
/// exist, or the remote has no fetch URL.
pub fn read_checkout(repo_path: impl AsRef<Path>, remote: &str) -> Result<Checkout> {
    let repo = gix::open(repo_path.as_ref()).with_context(|| {
        format!(
            "Failed to open repository at {}",
            repo_path.as_ref().display()
        )
    })?;

    let found = repo
        .find_remote(remote)
        .with_context(|| format!("Failed to find remote {}", remote))?;

    let url = found
        .url(gix::remote::Direction::Fetch)
        .with_context(|| format!("Remote {} has no fetch URL", remote))?
        .to_bstring();

    let url = url
        .to_str()
        .with_context(|| format!("Remote {} URL contains invalid UTF8", remote))?
        .to_string();

    let head = match repo.head_commit() {
        Ok(commit) => Some(commit.id().to_hex().to_string()),
        Err(e) => {
            debug!(error = %e, "no HEAD commit");
            None
        }
    };

    debug!(remote, url = %url, head = ?head, "read checkout");

    Ok(Checkout {
        descriptor: RepositoryDescriptor::new(url),
        remote: remote.to_string(),
        head,
    })
}
