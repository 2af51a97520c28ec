//! PomoTask server binary
//!
//! Serves the clarify, categorize and motivate routes.

use anyhow::Context;
use pomotask_server::{config::ServerConfig, start_server};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)
            .with_context(|| format!("loading {}", config_path))?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    } else {
        let mut config = ServerConfig::default();
        if let Ok(port) = env::var("PORT") {
            config.bind_port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?;
        }
        config
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("PomoTask Server - task metadata, categories and quotes from a language model");
    println!();
    println!("USAGE:");
    println!("    pomotask-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT       Port to bind when no config file is given (default: 3000)");
    println!("    HF_TOKEN   Bearer token for the model endpoint");
    println!("    RUST_LOG   Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address, bind_port");
    println!("    [llm]        endpoint, model, api_key_env");
    println!("    [extractor]  max_title_length, [extractor.metadata|category|quote]");
    println!();
}
