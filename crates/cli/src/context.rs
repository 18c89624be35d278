//! Config loading and resolver wiring shared by the commands

use anyhow::{bail, Context, Result};
use artefactum_core::store::{FileCache, FileFallbackStore};
use artefactum_core::{normalize_domain, ArtefactumConfig, HttpTransport, LicenseStatusResolver};
use std::path::Path;
use std::sync::Arc;

/// Environment variable consulted when `--domain` is not given.
pub const ENV_DOMAIN: &str = "ARTEFACTUM_DOMAIN";

/// Loads `--config` if given, otherwise searches from the current directory.
/// Environment overrides are applied either way.
pub fn load_config(path: Option<&Path>) -> Result<ArtefactumConfig> {
    let config = match path {
        Some(p) => ArtefactumConfig::from_file(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            ArtefactumConfig::find_and_load(&cwd).context("loading .artefactum.toml")?
        }
    };
    Ok(config.with_env_overrides())
}

/// Normalized domain from `--domain`, falling back to `ARTEFACTUM_DOMAIN`.
pub fn select_domain(flag: Option<&str>, env: Option<String>) -> Result<String> {
    let raw = flag
        .map(str::to_string)
        .or(env)
        .filter(|d| !d.trim().is_empty());
    match raw {
        Some(d) => Ok(normalize_domain(&d)),
        None => bail!("no domain given (use --domain or {ENV_DOMAIN})"),
    }
}

pub fn domain_from_cli(cli: &crate::Cli) -> Result<String> {
    select_domain(cli.domain.as_deref(), std::env::var(ENV_DOMAIN).ok())
}

/// Resolver over the HTTP transport and the file stores in the user config dir.
pub fn build_resolver(config: &ArtefactumConfig) -> Result<LicenseStatusResolver> {
    config.validate()?;
    open_resolver(config)
}

/// Like [`build_resolver`] without requiring a usable API configuration.
/// Enough for maintenance that never reaches the network.
pub fn open_resolver(config: &ArtefactumConfig) -> Result<LicenseStatusResolver> {
    let transport = HttpTransport::new(
        &config.api.url,
        config.api.timeout(),
        &config.api.user_agent,
    )
    .context("building HTTP client")?;
    let cache = FileCache::open_default().context("opening license cache")?;
    let fallback = FileFallbackStore::open_default().context("opening last known state")?;

    Ok(LicenseStatusResolver::new(
        config.into(),
        Arc::new(transport),
        Arc::new(cache),
        Arc::new(fallback),
    ))
}
