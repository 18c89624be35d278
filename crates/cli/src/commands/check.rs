//! Force a fresh check against the license server

use anyhow::Result;
use colored::Colorize;

use crate::context::{build_resolver, domain_from_cli, load_config};
use crate::output::{json, terminal};
use crate::Cli;

pub fn run(cli: &Cli, as_json: bool) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let domain = domain_from_cli(cli)?;
    let resolver = build_resolver(&config)?;

    if !as_json {
        println!("{}", "Checking license...".dimmed());
    }

    let resolution = resolver.resolve_with_source(&domain, true, None);
    let cached_until = json::cached_until(resolution.source, resolver.cached(&domain));

    if as_json {
        return json::print(&json::JsonOutput::new(
            &resolution.record,
            resolution.source,
            cached_until,
        ));
    }

    terminal::print_details(&resolution.record, resolution.source);
    Ok(())
}
