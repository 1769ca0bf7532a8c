use anyhow::{Context, Result};
use sourcelink::{Catalog, Config, LinkRequest, LinkResolver, RepositoryDescriptor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Installs stderr logging, honouring `RUST_LOG` over the verbosity flags.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolves the link described by the command line.
///
/// # Returns
///
/// Browsable link for the requested file
///
/// # Errors
///
/// Returns error if the catalog or checkout cannot be read, or the named
/// repository does not exist
fn resolve(config: &Config, path: &str) -> Result<String> {
    let (descriptor, default_rev) = match (&config.catalog, &config.repo) {
        (Some(catalog_path), Some(name)) => {
            let catalog = Catalog::load(catalog_path)?;
            let entry = catalog
                .get(name)
                .with_context(|| format!("Unknown repository: {}", name))?;
            (
                entry.descriptor().clone(),
                entry.default_revision().map(String::from),
            )
        }
        _ => {
            let checkout = sourcelink::read_checkout(&config.checkout, &config.remote)
                .context("Failed to read local checkout")?;
            let head = checkout.head().map(String::from);
            if head.is_none() {
                warn!("checkout has no commits, link will keep the {{rev}} placeholder");
            }
            (checkout.into_descriptor(), head)
        }
    };

    let pattern = config.pattern(&descriptor.url_pattern);
    let descriptor = RepositoryDescriptor {
        url_pattern: pattern,
        ..descriptor
    };

    let request = LinkRequest {
        path,
        line: config.line,
        revision: config.rev.as_deref().or(default_rev.as_deref()),
    };

    Ok(LinkResolver::new(&descriptor).resolve(&request))
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config);
    config.validate().context("Invalid configuration")?;

    if config.list
        && let Some(catalog_path) = &config.catalog
    {
        let catalog = Catalog::load(catalog_path)?;
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let path = config.path.as_deref().unwrap_or_default();
    let link = resolve(&config, path)?;
    println!("{}", link);

    if config.open {
        info!(link = %link, "opening browser");
        open::that(&link).with_context(|| format!("Failed to open {}", link))?;
    }

    Ok(())
}
