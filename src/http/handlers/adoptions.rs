//! Adoption application handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use tracing::info;

use super::super::{AppError, AppState};
use crate::model::{Adoption, AdoptionInput};
use crate::validation::validate_adoption;

#[derive(Debug, Serialize)]
pub(crate) struct AdoptionResponse {
    success: bool,
    message: &'static str,
    data: Adoption,
}

/// POST /api/adoptions - Submit an adoption application.
pub(crate) async fn submit_adoption(
    State(state): State<AppState>,
    payload: Result<Json<AdoptionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AdoptionResponse>), AppError> {
    let Json(input) = payload?;
    let application = validate_adoption(&input)?;

    let stored = state.adoptions.submit(application).await?;
    info!(
        id = stored.id,
        pet = %stored.application.pet_name,
        sink = state.adoptions.sink_name(),
        "adoption application received"
    );

    Ok((
        StatusCode::CREATED,
        Json(AdoptionResponse {
            success: true,
            message: "Adoption application submitted successfully",
            data: stored,
        }),
    ))
}
