//! Remove cached license state

use anyhow::{Context, Result};

use crate::context::{domain_from_cli, load_config, open_resolver};
use crate::Cli;

pub fn run(cli: &Cli, all: bool) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let domain = domain_from_cli(cli)?;
    let resolver = open_resolver(&config)?;

    if all {
        resolver
            .clear_cache(&domain)
            .context("clearing license state")?;
        println!("✅ Cleared cached and last known license state for {domain}");
    } else {
        resolver
            .clear_short_term(&domain)
            .context("clearing license cache")?;
        println!("✅ Cleared license cache for {domain}");
    }

    Ok(())
}
