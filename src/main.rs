//! Airport weather server
//!
//! Starts the collector and query HTTP APIs over one in-memory backend.

use std::path::PathBuf;
use std::sync::Arc;

use airweather::{AirweatherConfig, WeatherApp, loader, logging, web};
use anyhow::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "airweather")]
#[command(about = "In-memory airport weather server", long_about = None, version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overrides the configured one
    #[arg(short, long)]
    port: Option<u16>,

    /// airports.dat file to register on startup
    #[arg(short, long)]
    airports: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AirweatherConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
        config.validate()?;
    }

    logging::init_logging(&config.logging)?;
    info!(version = airweather::VERSION, "Starting airweather");

    let app = Arc::new(WeatherApp::new(&config.query));

    if let Some(path) = cli.airports {
        loader::load_airports(app.airports(), &path)?;
    }

    web::run(app, &config.server).await
}
