//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::git::DEFAULT_REMOTE;
use crate::link::UrlPattern;

/// Command line configuration for Sourcelink.
#[derive(Debug, Clone, Parser)]
#[command(name = "sourcelink", version, about, long_about = None)]
pub struct Config {
    /// File path relative to repository root
    pub path: Option<String>,

    /// Repository catalog (server config or repository listing JSON)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Repository name in the catalog
    #[arg(short, long, requires = "catalog")]
    pub repo: Option<String>,

    /// Local checkout to read the remote from when no catalog is given
    #[arg(long, default_value = ".")]
    pub checkout: PathBuf,

    /// Remote name in the local checkout
    #[arg(long, default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// Line number to anchor the link to
    #[arg(short, long)]
    pub line: Option<u32>,

    /// Revision to link to (defaults to configured ref or HEAD)
    #[arg(long)]
    pub rev: Option<String>,

    /// Override the base URL template
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the line anchor template
    #[arg(long)]
    pub anchor: Option<String>,

    /// List catalog repositories and exit
    #[arg(long, requires = "catalog")]
    pub list: bool,

    /// Open the link in the default browser
    #[arg(long)]
    pub open: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if an input path does not exist, or a required
    /// argument for the selected mode is missing.
    pub fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog
            && !catalog.exists()
        {
            bail!("Catalog does not exist: {}", catalog.display());
        }

        if self.list {
            return Ok(());
        }

        if self.path.is_none() {
            bail!("File path is required");
        }

        match &self.catalog {
            Some(_) if self.repo.is_none() => {
                bail!("--repo is required when resolving against a catalog");
            }
            None if !self.checkout.exists() => {
                bail!("Checkout path does not exist: {}", self.checkout.display());
            }
            _ => {}
        }

        Ok(())
    }

    /// Applies template overrides on top of a repository pattern.
    pub fn pattern(&self, base: &UrlPattern) -> UrlPattern {
        UrlPattern {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| base.base_url.clone()),
            anchor: self.anchor.clone().unwrap_or_else(|| base.anchor.clone()),
        }
    }

    /// Log filter directive derived from verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
