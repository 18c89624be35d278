//! Evaluate the access policy for a caller

use anyhow::Result;
use artefactum_core::{
    evaluate_access, notices, AccessDecision, CallerContext, LicenseRecord, PolicyConfig,
};
use colored::Colorize;

use crate::context::{build_resolver, domain_from_cli, load_config};
use crate::output::terminal;
use crate::Cli;

/// Caller described by the command-line flags.
pub fn caller(user: Option<&str>, privileged: bool, non_interactive: bool) -> CallerContext {
    CallerContext {
        identity: user
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string),
        privileged,
        interactive: !non_interactive,
    }
}

/// Decision for `caller` plus the notice lines to show under it.
///
/// Notices are included whatever the decision, so operator messages still
/// reach a blocked caller.
pub fn report(
    record: &LicenseRecord,
    caller: &CallerContext,
    policy: &PolicyConfig,
) -> (AccessDecision, Vec<String>) {
    let decision = evaluate_access(record, caller, policy);
    let lines = notices(record, policy)
        .iter()
        .map(terminal::format_notice)
        .collect();
    (decision, lines)
}

/// Prints the decision and any notices. Returns `true` when access is blocked.
pub fn run(cli: &Cli, caller: &CallerContext) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let domain = domain_from_cli(cli)?;
    let resolver = build_resolver(&config)?;

    let record = resolver.resolve(&domain, false);
    let (decision, lines) = report(&record, caller, &config.policy);

    println!("{} {}", "Access policy for".bold(), domain.cyan());
    println!("  {}", terminal::format_decision(&decision));

    if !lines.is_empty() {
        println!();
        for line in &lines {
            println!("  {line}");
        }
    }

    Ok(decision.is_blocked())
}
