//! Source link resolution.
//!
//! Turns a repository remote URL plus a file location into a browsable link
//! on the hosting service. Remote URLs come in HTTPS, SSH shorthand and SSH
//! with explicit port forms, and hosted wikis need their own rewrite; all are
//! normalised before the per repository URL pattern is expanded.

mod remote;
mod resolver;
mod template;

pub use remote::SshRemote;
pub use resolver::{
    DEFAULT_ANCHOR, DEFAULT_BASE_URL, LinkRequest, LinkResolver, RepositoryDescriptor,
    ResolvedCoordinates, UrlPattern, compute_coordinates, resolve_link,
};
pub use template::expand_template;
