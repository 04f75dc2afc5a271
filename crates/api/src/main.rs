//! Standalone server: any store startup failure aborts the process.

use anyhow::Context;
use folio_api::config::ServerConfig;
use folio_api::startup::{self, StorePolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid configuration")?;

    // --- Tracing ---
    startup::init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        store_mode = ?config.store_mode,
        "Loaded server configuration",
    );

    // --- Store ---
    let store = startup::open_store(&config, StorePolicy::Fatal).await?;

    // --- Start server ---
    startup::serve(config, store).await
}
