//! Stockroom server entry point.
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌──────────────┐
//! │  Config  │───▶│   Stores     │───▶│   Gateway    │
//! │  (YAML)  │    │ (in-memory)  │    │ (axum HTTP)  │
//! └──────────┘    └──────────────┘    └──────────────┘
//! ```

use std::sync::Arc;

use stockroom::catalog::{InMemoryProductCatalog, InMemoryWarehouseDirectory};
use stockroom::config::AppConfig;
use stockroom::gateway::{self, state::AppState};
use stockroom::stock::InMemoryStockStore;
use stockroom::transfer::{InMemoryTransferStore, TransferEngine};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = stockroom::logging::init_logging(&config);

    tracing::info!("Starting stockroom in {} mode", env);

    let warehouses = InMemoryWarehouseDirectory::new();
    let products = InMemoryProductCatalog::new();
    let stock = InMemoryStockStore::new();
    let transfers = InMemoryTransferStore::new();

    let engine = Arc::new(TransferEngine::new(
        transfers,
        stock.clone(),
        warehouses.clone(),
        products.clone(),
    ));

    let state = Arc::new(AppState::new(
        engine,
        warehouses,
        products,
        stock,
        config.auth.clone(),
    ));

    let port = get_port_override().unwrap_or(config.gateway.port);
    gateway::serve(state, &config.gateway.host, port).await
}
