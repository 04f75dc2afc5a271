//! Process bootstrap shared by the `folio-api` and `folio-edge` binaries.
//!
//! The two binaries differ only in [`StorePolicy`]: what happens when the
//! configured PostgreSQL store cannot be brought up.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use folio_db::seed;
use folio_db::{MemoryStore, PgStore, PortfolioStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, ServerConfig, StoreMode, DEFAULT_LOG_FILTER};
use crate::router::build_app;
use crate::state::AppState;

/// Reaction to a PostgreSQL startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePolicy {
    /// Return the error; the process exits non-zero.
    Fatal,
    /// Log the error and serve from a seeded in-memory store.
    FallBackToMemory,
}

/// Install the global tracing subscriber. Call once per process.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Bring up the store selected by `STORE_MODE`.
pub async fn open_store(
    config: &ServerConfig,
    policy: StorePolicy,
) -> anyhow::Result<Arc<dyn PortfolioStore>> {
    match config.store_mode {
        StoreMode::Memory => memory_store(config.seed_sample_data).await,
        StoreMode::Postgres => match postgres_store(config).await {
            Ok(store) => Ok(store),
            Err(err) if policy == StorePolicy::FallBackToMemory => {
                tracing::error!(
                    error = %format!("{err:#}"),
                    "PostgreSQL unavailable, serving from in-memory store",
                );
                memory_store(true).await
            }
            Err(err) => Err(err),
        },
    }
}

async fn memory_store(seeded: bool) -> anyhow::Result<Arc<dyn PortfolioStore>> {
    let store = if seeded {
        MemoryStore::seeded()
            .await
            .context("Failed to load sample data into memory store")?
    } else {
        MemoryStore::new()
    };
    tracing::info!(seeded, "In-memory store ready");
    Ok(Arc::new(store))
}

async fn postgres_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn PortfolioStore>> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set when STORE_MODE=postgres")?;

    let pool = folio_db::create_pool(database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    folio_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    if config.seed_sample_data {
        match seed::seed_if_empty(&pool).await {
            Ok(outcome) => tracing::info!(?outcome, "Sample data check complete"),
            Err(err) => tracing::warn!(error = %err, "Failed to seed sample data"),
        }
    }

    Ok(Arc::new(PgStore::new(pool)))
}

/// Bind, serve until SIGINT/SIGTERM, then drain in-flight requests.
pub async fn serve(config: ServerConfig, store: Arc<dyn PortfolioStore>) -> anyhow::Result<()> {
    let host = config
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    let backend = store.backend();

    let app = build_app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, backend, "Starting server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed, that signal is simply never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
