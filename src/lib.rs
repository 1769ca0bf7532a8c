//! Browsable source links for code search results.

mod catalog;
mod config;
mod git;
pub mod link;

pub use catalog::{Catalog, CatalogEntry, VcsConfig};
pub use config::Config;
pub use git::{Checkout, DEFAULT_REMOTE, read_checkout};
pub use link::{
    LinkRequest, LinkResolver, RepositoryDescriptor, ResolvedCoordinates, UrlPattern,
    compute_coordinates, expand_template, resolve_link,
};
