use std::env;
use std::sync::Arc;

use stellar_pay::api::server;
use stellar_pay::config::StellarConfig;
use stellar_pay::service::WalletService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StellarConfig::from_env();
    let service = Arc::new(WalletService::new(config));

    // Use BIND_ADDRESS=127.0.0.1:3000 for local development
    let addr = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    log::info!("Starting Stellar Pay orchestrator on {}", addr);
    server::start_server(&addr, service).await?;
    Ok(())
}
