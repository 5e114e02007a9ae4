//! HTTP surface of the shelter service.
//!
//! Routes:
//!
//! - `GET /health` - liveness and active backends
//! - `GET /api/pets`, `GET /api/pets/{id}` - public reads
//! - `POST /api/pets`, `DELETE /api/pets/{id}` - gated by `x-api-key` when
//!   an admin key is configured
//! - `POST /api/adoptions` - adoption applications
//!
//! Every response carries an `x-request-id` header. CORS is permissive.

mod audit;
mod auth;
mod error;
pub(crate) mod handlers;
mod request_id;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

pub use auth::AdminKey;
pub use error::AppError;

use crate::adoption::AdoptionLedger;
use crate::config::{BackendKind, Config};
use crate::store::PetStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub pets: PetStore,
    pub adoptions: AdoptionLedger,
    pub admin_key: Option<AdminKey>,
}

impl AppState {
    pub fn new(pets: PetStore, adoptions: AdoptionLedger, admin_key: Option<AdminKey>) -> Self {
        Self {
            pets,
            adoptions,
            admin_key,
        }
    }

    /// Builds the stores the configuration asks for.
    ///
    /// The local backend is always constructed; with a remote table
    /// configured it becomes the read fallback and adoptions go remote.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite database or the remote client cannot
    /// be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        let local = match config.backend {
            BackendKind::File => PetStore::file(config.pets_file()),
            BackendKind::Sqlite => PetStore::sqlite(config.sqlite_file()).with_context(|| {
                format!("Failed to open database {}", config.sqlite_file().display())
            })?,
            BackendKind::Memory => PetStore::memory(),
        };

        let (pets, adoptions) = match config.remote() {
            Some(remote) => (
                PetStore::remote(&remote, local).context("Failed to build remote pet store")?,
                AdoptionLedger::remote(&remote).context("Failed to build remote adoption sink")?,
            ),
            None => (local, AdoptionLedger::local(config.adoptions_file())),
        };

        let admin_key = config.admin_api_key().map(AdminKey::new);
        if admin_key.is_none() {
            warn!("ADMIN_API_KEY is not set; pet mutations are open to anyone");
        }

        Ok(Self::new(pets, adoptions, admin_key))
    }
}

/// Builds the application router.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/pets",
            get(handlers::pets::list_pets).post(handlers::pets::create_pet),
        )
        .route(
            "/api/pets/{id}",
            get(handlers::pets::get_pet).delete(handlers::pets::delete_pet),
        )
        .route("/api/adoptions", post(handlers::adoptions::submit_adoption))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id::request_id))
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the stores cannot be built, the address is invalid
/// or already in use, or the server fails.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    info!(
        backend = state.pets.backend_name(),
        adoptions = state.adoptions.sink_name(),
        data_dir = %config.data_dir.display(),
        "stores ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "pawshaven listening");

    axum::serve(listener, router(state, config.request_timeout()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = tokio::signal::ctrl_c() => {},
                }
            },
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            },
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
