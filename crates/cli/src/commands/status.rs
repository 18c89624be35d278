//! Show the current license status

use anyhow::Result;
use colored::Colorize;

use crate::context::{build_resolver, domain_from_cli, load_config};
use crate::output::{json, terminal};
use crate::Cli;

pub fn run(cli: &Cli, as_json: bool) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let domain = domain_from_cli(cli)?;
    let resolver = build_resolver(&config)?;

    let resolution = resolver.resolve_with_source(&domain, false, None);
    let cached_until = json::cached_until(resolution.source, resolver.cached(&domain));

    if as_json {
        return json::print(&json::JsonOutput::new(
            &resolution.record,
            resolution.source,
            cached_until,
        ));
    }

    println!("{} {}", "License status for".bold(), domain.cyan());
    terminal::print_summary(&resolution.record, resolution.source);
    Ok(())
}
