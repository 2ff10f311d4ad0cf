//! API server binary
//!
//! Boots the registration back office: configuration from the environment,
//! tracing, the SQLite pool with migrations applied, then the axum router
//! until Ctrl+C or SIGTERM.
//!
//! Configuration keys are `API__` prefixed with `__` between sections
//! (`API__SERVER__PORT`, `API__MAIL__ENABLED`, `API__ARTIFACTS__KIND`).
//! Plain `PORT` and `DATABASE_URL` are honored as overrides because hosting
//! platforms inject them unprefixed.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, DatabaseConfig, DatabasePool};
use interface_api::config::{ApiConfig, LogConfig};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_tracing(&config.log);

    info!(
        host = %config.server.host,
        port = %config.server.port,
        "starting registration back office"
    );

    let pool = prepare_database(&config).await?;

    let addr: SocketAddr = config.server_addr().parse()?;
    let state =
        AppState::from_config(pool, config).context("failed to wire application state")?;

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

/// Environment configuration plus the unprefixed platform overrides.
fn load_config() -> anyhow::Result<ApiConfig> {
    let mut config = ApiConfig::from_env().context("configuration failed to load")?;

    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port.parse().context("PORT must be a port number")?;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }

    Ok(config)
}

/// Tracing goes to stdout, text or JSON per config. `RUST_LOG` wins over
/// the configured level when set.
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let base = tracing_subscriber::registry().with(filter);
    if log.json {
        base.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        base.with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Opens the pool and brings the schema up to date.
async fn prepare_database(config: &ApiConfig) -> anyhow::Result<DatabasePool> {
    let db = &config.database;

    let pool = create_pool(
        DatabaseConfig::new(&db.url)
            .max_connections(db.max_connections)
            .connect_timeout(Duration::from_secs(db.connect_timeout_secs)),
    )
    .await
    .context("database pool failed to open")?;

    infra_db::MIGRATOR
        .run(&pool)
        .await
        .context("migrations failed to apply")?;

    info!(url = %db.url, "database ready");
    Ok(pool)
}

/// Resolves on Ctrl+C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl+C handler failed to install");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler failed to install")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, draining"),
        _ = terminate => info!("SIGTERM received, draining"),
    }
}
