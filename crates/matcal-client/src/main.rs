//! matcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use matcal_core::{TracingConfig, init_tracing};
use matcal_providers::{CalendarService, HttpFeedSource};

use matcal_client::cli::{Cli, Command, ConfigAction};
use matcal_client::commands::{self, events::EventsOptions};
use matcal_client::config::ClientConfig;
use matcal_client::error::ClientResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Events {
            name,
            no_cache,
            event_type,
        } => {
            let feed_config = config.feed_config();
            let source = HttpFeedSource::new(&feed_config)?;
            let service = CalendarService::with_config(source, config.registry(), &feed_config);
            let options = EventsOptions {
                no_cache,
                event_type,
                pretty: cli.pretty,
            };
            commands::events::run(&service, &name, &options, &mut stdout).await
        }
        Command::Parse { path, event_type } => {
            commands::parse::run(&path, event_type, cli.pretty, &mut stdout)
        }
        Command::Calendars => commands::calendars::run(&config.registry(), cli.pretty, &mut stdout),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path, &mut stdout),
            ConfigAction::Path => commands::config::path(&config_path, &mut stdout),
        },
    }
}
