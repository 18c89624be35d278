//! Artefactum CLI library, exposed for integration tests

pub mod commands;
pub mod context;
pub mod logging;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artefactum")]
#[command(about = "Check and manage the Artefactum license of a site", long_about = None)]
#[command(version = artefactum_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to .artefactum.toml (default: search from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Site hostname (normalized: lowercase, no www.)
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current license status (default command)
    Status {
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the license server again, bypassing the cache
    #[command(alias = "refresh")]
    Check {
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the cached license state
    ClearCache {
        /// Also remove the last known state kept for outages
        #[arg(long)]
        all: bool,
    },

    /// Evaluate the access policy for a caller
    Policy {
        /// Login name of the caller
        #[arg(long)]
        user: Option<String>,

        /// Caller is a site administrator
        #[arg(long)]
        privileged: bool,

        /// Caller is a background job or API client
        #[arg(long)]
        non_interactive: bool,
    },

    /// Initialize .artefactum.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}
