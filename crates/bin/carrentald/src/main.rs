//! # carrentald: carrental daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Open the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then close the database
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use axum::Router;
use carrental_adapter_http_axum::state::AppState;
use carrental_adapter_storage_sqlite_sqlx::{
    Database, SqliteCarRepository, SqliteRentalRepository,
};
use carrental_app::services::car_service::CarService;
use carrental_app::services::rental_service::RentalService;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = carrental_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let car_repo = SqliteCarRepository::new(pool.clone());
    let rental_repo = SqliteRentalRepository::new(pool);

    // Services
    let car_service = CarService::new(car_repo.clone());
    let rental_service = RentalService::new(rental_repo, car_repo);

    // HTTP
    let state = AppState::new(car_service, rental_service);
    let app = carrental_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "carrentald listening");

    serve(listener, app, db, shutdown_signal()).await?;

    Ok(())
}

/// Serve `app` until `shutdown` resolves, then close `db`.
///
/// The database is closed whether serving ended cleanly or with an error;
/// the serve result is returned afterwards.
async fn serve(
    listener: TcpListener,
    app: Router,
    db: Database,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    tracing::info!("shutting down");
    db.close().await;

    served
}

/// Resolve when the process receives Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to listen for Ctrl-C");
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
                tracing::warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_close_database_when_server_stops() {
        let db = carrental_adapter_storage_sqlite_sqlx::Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        serve(listener, Router::new(), db, async {}).await.unwrap();

        assert!(pool.is_closed());
    }
}
