mod config;
mod engine;
mod error;
mod feeds;
mod types;
mod web;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{default_config_template, Config};
use engine::spread::SpreadService;
use feeds::coingecko::CoinGeckoSource;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use web::server::WebServer;

#[derive(Parser)]
#[command(name = "premium-spread")]
#[command(about = "Serves the premium spread between two Black-Scholes calls on a live spot price")]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(long, short, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch one spot price, print the spread as JSON and exit
    Quote,
    /// Print a default configuration file
    GenerateConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command.unwrap_or(Command::Serve { port: None }) {
        Command::GenerateConfig => {
            print!("{}", default_config_template()?);
        }
        Command::Quote => {
            let spread = spread_service(&config)?;
            let result = spread.quote().await.context("Failed to compute premium spread")?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Serve { port } => {
            let spread = spread_service(&config)?;
            if let Some(port) = port {
                config.server.port = port;
            }
            WebServer::new(config.server, spread).run().await?;
        }
    }

    Ok(())
}

fn spread_service(config: &Config) -> anyhow::Result<SpreadService> {
    let source = CoinGeckoSource::new(&config.price_source)?;
    info!(
        "Price source: {} ({}/{}, timeout {:?})",
        config.price_source.base_url,
        config.price_source.asset_id,
        config.price_source.vs_currency,
        config.price_source.timeout()
    );
    let spread = SpreadService::new(Arc::new(source), config.pricing);
    info!("Pricing: {:?}", spread.config());
    Ok(spread)
}
