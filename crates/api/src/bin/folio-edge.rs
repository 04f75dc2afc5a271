//! Always-on deployment entry point: if PostgreSQL cannot be brought up,
//! or the configuration is invalid, keep serving from a seeded in-memory
//! store instead of exiting.

use folio_api::config::{ServerConfig, StoreMode};
use folio_api::startup::{self, StorePolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let (config, config_error) = match ServerConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => {
            let fallback = ServerConfig {
                store_mode: StoreMode::Memory,
                ..ServerConfig::default()
            };
            (fallback, Some(err))
        }
    };

    // --- Tracing ---
    startup::init_tracing(config.log_format);
    if let Some(err) = config_error {
        tracing::error!(error = %err, "Invalid configuration, using in-memory defaults");
    }
    tracing::info!(
        host = %config.host,
        port = config.port,
        store_mode = ?config.store_mode,
        "Loaded server configuration",
    );

    // --- Store ---
    let store = startup::open_store(&config, StorePolicy::FallBackToMemory).await?;

    // --- Start server ---
    startup::serve(config, store).await
}
