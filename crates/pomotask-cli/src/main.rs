//! PomoTask CLI - Command-line interface for the PomoTask server.

use clap::Parser;
use pomotask_cli::commands;
use pomotask_cli::repl;
use pomotask_cli::{Cli, Command, Config, Formatter, PomoTaskClient};
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> pomotask_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => match Config::path() {
            Ok(path) => Config::load_or_init(&path),
            Err(e) => {
                warn!("{}", e);
                Config::default()
            }
        },
    };

    if let Some(url) = &cli.server {
        config.set_server_url(url)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let client = PomoTaskClient::new(&config.server_url);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &client, &formatter).await?;
        }
        Some(Command::Clarify(args)) => {
            commands::execute_clarify(args, &client, &formatter).await?;
        }
        Some(Command::Categorize(args)) => {
            commands::execute_categorize(args, &client, &formatter).await?;
        }
        Some(Command::Motivate(args)) => {
            commands::execute_motivate(args, &client, &formatter).await?;
        }
        Some(Command::Health) => {
            commands::execute_health(&client, &formatter).await?;
        }
    }

    Ok(())
}
