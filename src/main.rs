//! sidekiq-server - entry point
//!
//! Ordine di avvio:
//! 1. Tracing (RUST_LOG, default "info")
//! 2. Configurazione dalle variabili d'ambiente (.env compreso)
//! 3. Pool Postgres e migrations
//! 4. Router HTTP con CORS e shutdown su SIGINT/SIGTERM

use sidekiq_server::{AppState, Config, cors_layer, create_router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // dotenv prima del filtro, così RUST_LOG può stare nel .env
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "sidekiq-server starting");

    let config = Config::from_env()?;
    config.print_info();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect(&config.database_url)
        .await?;
    info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied");

    if config.is_test() {
        warn!("APP_ENV=test: POST /api/test/reset-and-seed is enabled");
    }

    let state = Arc::new(
        AppState::new(pool, config.jwt_secret.clone()).with_test_hooks(config.is_test()),
    );
    let app = create_router(state).layer(cors_layer(&config));

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("sidekiq-server stopped");
    Ok(())
}

/// Completa alla ricezione di SIGINT (Ctrl-C) o SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
