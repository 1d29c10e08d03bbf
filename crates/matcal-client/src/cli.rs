//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use matcal_core::EventType;

/// matcal - Team schedule feeds as JSON
#[derive(Debug, Parser)]
#[command(name = "matcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "MATCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a registered calendar and print its events
    Events {
        /// Calendar name (see `matcal calendars`)
        name: String,

        /// Always fetch, ignoring cached results
        #[arg(long)]
        no_cache: bool,

        /// Only print events of this type
        #[arg(long = "type", value_name = "TYPE")]
        event_type: Option<EventType>,
    },

    /// Parse a local feed file and print its events
    Parse {
        /// Path to an .ics file, or `-` for stdin
        path: PathBuf,

        /// Only print events of this type
        #[arg(long = "type", value_name = "TYPE")]
        event_type: Option<EventType>,
    },

    /// List registered calendars and their feed URLs
    Calendars,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
