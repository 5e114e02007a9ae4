//! Health check handler.

use axum::{Json, extract::State};
use serde::Serialize;

use super::super::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    backend: &'static str,
    adoptions: &'static str,
    version: &'static str,
}

/// GET /health - Report liveness and the active storage backends.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.pets.backend_name(),
        adoptions: state.adoptions.sink_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
