//! Artefactum CLI - license checks for a site

use anyhow::Result;
use artefactum_cli::{commands, logging, Cli, Commands};
use clap::Parser;

/// Exit code when the access policy blocks the caller.
const EXIT_BLOCKED: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(Commands::Status { json }) => {
            commands::status::run(&cli, json)?;
        }
        Some(Commands::Check { json }) => {
            commands::check::run(&cli, json)?;
        }
        Some(Commands::ClearCache { all }) => {
            commands::clear_cache::run(&cli, all)?;
        }
        Some(Commands::Policy {
            ref user,
            privileged,
            non_interactive,
        }) => {
            let caller = commands::policy::caller(user.as_deref(), privileged, non_interactive);
            if commands::policy::run(&cli, &caller)? {
                std::process::exit(EXIT_BLOCKED);
            }
        }
        Some(Commands::Init { ref path }) => {
            commands::init::run(path.as_deref())?;
        }
        None => {
            // Default command is status
            commands::status::run(&cli, false)?;
        }
    }

    Ok(())
}
