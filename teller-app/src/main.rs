//! # Teller Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the in-memory ledger (optionally seeded with demo data)
//! - Create the console service with the HTTP biller gateway
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teller_hex::{ConsoleService, inbound::HttpServer, outbound::HttpBillerGateway};
use teller_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,teller_app=debug,teller_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting teller server on port {}", config.port);
    tracing::info!("Using biller backend: {}", config.biller_base_url);

    // Build the in-memory ledger; state is ephemeral and resets on restart.
    let repo = build_repo(config.seed_demo_data).await?;
    if config.seed_demo_data {
        tracing::info!("Demo dataset loaded");
    }

    let biller = HttpBillerGateway::new(&config.biller_base_url, config.biller_timeout)?;

    // Create the console service
    let service = ConsoleService::new(repo, biller);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
