//! Repository catalog loading.
//!
//! Reads the repository configuration shared with the search server. Both
//! the server configuration file (an object with a `repos` map) and the
//! repository listing returned by its API (a bare name to repository map)
//! are accepted.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::link::{LinkRequest, LinkResolver, RepositoryDescriptor};

/// Default version control system for entries without `vcs`.
const DEFAULT_VCS: &str = "git";

/// Version control settings of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VcsConfig {
    /// Branch, tag or commit the repository is indexed at.
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
}

/// Repository entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    descriptor: RepositoryDescriptor,
    #[serde(default = "default_vcs")]
    vcs: String,
    #[serde(rename = "vcs-config", default)]
    vcs_config: VcsConfig,
}

fn default_vcs() -> String {
    DEFAULT_VCS.to_string()
}

impl CatalogEntry {
    /// Remote URL and link templates.
    pub fn descriptor(&self) -> &RepositoryDescriptor {
        &self.descriptor
    }

    /// Version control system name.
    pub fn vcs(&self) -> &str {
        &self.vcs
    }

    /// Revision used when a link request carries none.
    pub fn default_revision(&self) -> Option<&str> {
        self.vcs_config.reference.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Config { repos: BTreeMap<String, CatalogEntry> },
    Listing(BTreeMap<String, CatalogEntry>),
}

/// Named repositories with their link templates.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    repos: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Loads catalog from JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Parses catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON matches neither accepted layout or an entry
    /// has an empty URL.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;

        let repos = match document {
            CatalogDocument::Config { repos } => repos,
            CatalogDocument::Listing(repos) => repos,
        };

        for (name, entry) in &repos {
            if entry.descriptor.url.trim().is_empty() {
                bail!("Repository {} has an empty url", name);
            }
            if entry.vcs != DEFAULT_VCS {
                warn!(repo = %name, vcs = %entry.vcs, "links for non-git repositories use the same templates");
            }
        }

        debug!(repos = repos.len(), "loaded catalog");
        Ok(Self { repos })
    }

    /// Looks up repository by name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.repos.get(name)
    }

    /// Repository names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repos.keys().map(String::as_str)
    }

    /// Number of repositories.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Whether the catalog has no repositories.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Resolves link for a file in a named repository.
    ///
    /// Falls back to the entry's configured ref when the request has no
    /// revision.
    ///
    /// # Errors
    ///
    /// Returns error if the repository is not in the catalog.
    pub fn resolve(&self, name: &str, request: &LinkRequest<'_>) -> Result<String> {
        let Some(entry) = self.get(name) else {
            bail!("Unknown repository: {}", name);
        };

        let request = LinkRequest {
            revision: request.revision.or(entry.default_revision()),
            ..*request
        };

        Ok(LinkResolver::new(entry.descriptor()).resolve(&request))
    }
}
