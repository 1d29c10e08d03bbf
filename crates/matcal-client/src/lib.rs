//! The `matcal` command-line tool.
//!
//! Fetches team calendar feeds, parses local `.ics` files and prints the
//! results as JSON.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
