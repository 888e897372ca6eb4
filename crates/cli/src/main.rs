//! Shopcart CLI - drive the shopcart REST service from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create a shopcart
//! shopcart shopcart create --total-price 19.99
//!
//! # Search shopcarts by item name
//! shopcart shopcart search --name apple
//!
//! # Add an item to shopcart 7
//! shopcart item create 7 --product-id 3 --name apple --price 1.25 --quantity 2
//!
//! # Point at another service
//! shopcart --api-url http://shopcarts.internal:8080 shopcart list
//! ```
//!
//! Each command runs exactly one console action and prints the flash message
//! followed by the result rows. The exit code is non-zero when the action
//! failed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

use commands::{ItemCommand, ShopcartCommand};

#[derive(Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "Shopcart console CLI")]
struct Cli {
    /// Base URL of the shopcart REST service (falls back to `SHOPCART_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage shopcarts
    Shopcart {
        #[command(subcommand)]
        action: ShopcartCommand,
    },
    /// Manage the items of a shopcart
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let api = commands::connect(cli.api_url.as_deref())?;

    let console = match cli.command {
        Commands::Shopcart { action } => action.run(&api).await,
        Commands::Item { action } => action.run(&api).await,
    };

    Ok(commands::report(&console))
}
