//! Source link resolution for repository remotes.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::remote::{SshRemote, strip_git_suffix, wiki_url};
use super::template::expand_template;

/// Default link template, matching GitHub style blob URLs.
pub const DEFAULT_BASE_URL: &str = "{url}/blob/{rev}/{path}{anchor}";

/// Default line anchor template.
pub const DEFAULT_ANCHOR: &str = "#L{line}";

/// Markdown extension dropped from wiki page paths.
const MARKDOWN_EXTENSION: &str = ".md";

/// Per hosting service link templates.
///
/// `base_url` builds the file link and may reference `{url}`, `{hostname}`,
/// `{port}`, `{project}`, `{repo}`, `{path}`, `{rev}` and `{anchor}`.
/// `anchor` builds the line fragment and may reference `{line}` and
/// `{filename}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlPattern {
    #[serde(rename = "base-url")]
    pub base_url: String,
    pub anchor: String,
}

impl UrlPattern {
    /// Creates pattern from base URL and anchor templates.
    pub fn new(base_url: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anchor: anchor.into(),
        }
    }
}

impl Default for UrlPattern {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_ANCHOR)
    }
}

/// Repository remote together with its link templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub url: String,
    #[serde(rename = "url-pattern", default)]
    pub url_pattern: UrlPattern,
}

impl RepositoryDescriptor {
    /// Creates descriptor with the default URL pattern.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            url_pattern: UrlPattern::default(),
        }
    }

    /// Replaces URL pattern.
    pub fn with_pattern(mut self, url_pattern: UrlPattern) -> Self {
        self.url_pattern = url_pattern;
        self
    }
}

/// File location to link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkRequest<'a> {
    /// File path relative to repository root.
    pub path: &'a str,
    /// 1-based line number. Zero is treated as absent.
    pub line: Option<u32>,
    /// Revision, branch or commit id.
    pub revision: Option<&'a str>,
}

impl<'a> LinkRequest<'a> {
    /// Creates request for a whole file.
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            line: None,
            revision: None,
        }
    }

    /// Anchors request to line.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Pins request to revision.
    pub fn at_revision(mut self, revision: &'a str) -> Self {
        self.revision = Some(revision);
        self
    }
}

/// Variables available to the base URL template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedCoordinates {
    pub url: String,
    pub hostname: String,
    pub port: String,
    pub project: String,
    pub repo: String,
    pub path: String,
    pub rev: Option<String>,
    pub anchor: String,
}

impl ResolvedCoordinates {
    /// Template variables in substitution order.
    ///
    /// `rev` is omitted when no revision was requested, leaving `{rev}`
    /// literal in the expanded link.
    pub fn variables(&self) -> Vec<(&str, &str)> {
        let mut vars = vec![
            ("url", self.url.as_str()),
            ("hostname", self.hostname.as_str()),
            ("port", self.port.as_str()),
            ("project", self.project.as_str()),
            ("repo", self.repo.as_str()),
            ("path", self.path.as_str()),
        ];
        if let Some(rev) = &self.rev {
            vars.push(("rev", rev.as_str()));
        }
        vars.push(("anchor", self.anchor.as_str()));
        vars
    }
}

/// Computes template variables for a remote and file location.
///
/// Strips `.git`, rewrites wiki remotes to their `/wiki` page root (with
/// `.md` dropped from the path and no line anchor), then normalises SSH
/// shorthand remotes into scheme relative URLs. Any other URL is taken as
/// already browsable and leaves the host coordinates empty.
///
/// # Arguments
///
/// * `url`: Remote URL as configured
/// * `pattern`: Link templates, the anchor template is expanded here
/// * `request`: File location
///
/// # Returns
///
/// Resolved coordinates ready for base URL expansion
pub fn compute_coordinates(
    url: &str,
    pattern: &UrlPattern,
    request: &LinkRequest<'_>,
) -> ResolvedCoordinates {
    let mut url = strip_git_suffix(url).to_string();
    let mut path = request.path.to_string();

    let filename = request
        .path
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or("");

    let mut anchor = match request.line {
        Some(line) if line > 0 => {
            let line = line.to_string();
            expand_template(&pattern.anchor, [("line", line.as_str()), ("filename", filename)])
        }
        _ => String::new(),
    };

    // Wikis render pages, not files, so there is no line to link to
    if let Some(wiki) = wiki_url(&url) {
        trace!(url = %wiki, "wiki remote");
        url = wiki;
        if let Some(stripped) = path.strip_suffix(MARKDOWN_EXTENSION) {
            path = stripped.to_string();
        }
        anchor.clear();
    }

    let mut coords = ResolvedCoordinates {
        path,
        rev: request.revision.map(String::from),
        anchor,
        ..Default::default()
    };

    match SshRemote::parse(&url) {
        Some(remote) => {
            trace!(scheme = remote.scheme(), host = remote.host(), "ssh shorthand remote");
            coords.url = remote.browse_url();
            coords.hostname = remote.hostname();
            coords.port = remote.port();
            coords.project = remote.project().to_string();
            coords.repo = remote.repo().to_string();
        }
        None => {
            trace!(url = %url, "passthrough remote");
            coords.url = url;
        }
    }

    coords
}

/// Builds browsable link for a file in a repository.
///
/// # Arguments
///
/// * `repo`: Repository remote and link templates
/// * `path`: File path relative to repository root
/// * `line`: Optional 1-based line number
/// * `revision`: Optional revision to link to
///
/// # Returns
///
/// Expanded base URL template
pub fn resolve_link(
    repo: &RepositoryDescriptor,
    path: &str,
    line: Option<u32>,
    revision: Option<&str>,
) -> String {
    LinkResolver::new(repo).resolve(&LinkRequest {
        path,
        line,
        revision,
    })
}

/// Resolves source links for one repository.
///
/// Borrows the descriptor, so a resolver can be created per search result
/// without cloning configuration.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    repo: &'a RepositoryDescriptor,
}

impl<'a> LinkResolver<'a> {
    /// Creates resolver for repository.
    pub fn new(repo: &'a RepositoryDescriptor) -> Self {
        Self { repo }
    }

    /// Computes template variables for request.
    pub fn coordinates(&self, request: &LinkRequest<'_>) -> ResolvedCoordinates {
        compute_coordinates(&self.repo.url, &self.repo.url_pattern, request)
    }

    /// Resolves request to browsable link.
    pub fn resolve(&self, request: &LinkRequest<'_>) -> String {
        let coords = self.coordinates(request);
        expand_template(&self.repo.url_pattern.base_url, coords.variables())
    }
}
