//! Remote URL shape detection.
//!
//! Recognises the SSH shorthand forms used by git and Mercurial hosting:
//!
//! ```text
//! remote  = scheme "@" host [ ":" port ] ( ":" | "/" ) project "/" repo
//! scheme  = "git" | "hg"
//! port    = 1*DIGIT
//! ```
//!
//! The rule is unanchored, so a leading `ssh://` is tolerated. The host is
//! the shortest run of characters that lets the rest of the rule match, and
//! the project takes everything up to the final `/`, which keeps nested
//! groups such as `group/subgroup` intact.

use regex::Regex;
use std::sync::LazyLock;

static SSH_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<scheme>git|hg)@(?P<host>.*?)(?::(?P<port>[0-9]+))?[:/](?P<project>.*)/(?P<repo>.*)",
    )
    .expect("SSH shorthand grammar is a valid regex")
});

/// Suffix git appends to bare repository remotes.
pub const GIT_SUFFIX: &str = ".git";

/// Suffix identifying a hosted wiki remote.
pub const WIKI_SUFFIX: &str = ".wiki";

/// Hosting coordinates extracted from an SSH shorthand remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshRemote {
    scheme: String,
    host: String,
    port: Option<String>,
    project: String,
    repo: String,
}

impl SshRemote {
    /// Parses an SSH shorthand remote.
    ///
    /// Returns None when the URL does not follow the shorthand rule, which
    /// callers treat as an already browsable URL.
    pub fn parse(url: &str) -> Option<Self> {
        let caps = SSH_SHORTHAND.captures(url)?;

        Some(Self {
            scheme: caps["scheme"].to_string(),
            host: caps["host"].to_string(),
            port: caps.name("port").map(|m| m.as_str().to_string()),
            project: caps["project"].to_string(),
            repo: caps["repo"].to_string(),
        })
    }

    /// VCS user token, `git` or `hg`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Bare host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host in scheme relative form (`//host`).
    pub fn hostname(&self) -> String {
        format!("//{}", self.host)
    }

    /// Port with leading colon, or empty string when none was given.
    pub fn port(&self) -> String {
        self.port
            .as_deref()
            .map(|p| format!(":{}", p))
            .unwrap_or_default()
    }

    /// Project or owner path preceding the repository name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Scheme relative URL rebuilt from the extracted coordinates.
    pub fn browse_url(&self) -> String {
        format!(
            "{}{}/{}/{}",
            self.hostname(),
            self.port(),
            self.project,
            self.repo
        )
    }
}

/// Removes a trailing `.git` suffix.
pub fn strip_git_suffix(url: &str) -> &str {
    url.strip_suffix(GIT_SUFFIX).unwrap_or(url)
}

/// Rewrites a trailing `.wiki` suffix to a `/wiki` path segment.
///
/// Returns None when the URL is not a wiki remote.
pub fn wiki_url(url: &str) -> Option<String> {
    url.strip_suffix(WIKI_SUFFIX)
        .map(|base| format!("{}/wiki", base))
}
