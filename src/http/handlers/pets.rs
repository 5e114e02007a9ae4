//! Pet handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};
use tracing::info;

use super::super::auth::authorize;
use super::super::{AppError, AppState};
use crate::model::{Pet, PetId, PetInput};
use crate::validation::validate_pet;

/// Path ids that are not integers can never match a record.
fn parse_id(raw: &str) -> Option<PetId> {
    raw.trim().parse().ok()
}

/// GET /api/pets - List every pet in store order.
pub(crate) async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>, AppError> {
    Ok(Json(state.pets.list().await?))
}

/// GET /api/pets/{id} - Fetch one pet.
pub(crate) async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Pet>, AppError> {
    let id = parse_id(&id).ok_or(AppError::NotFound)?;
    state.pets.get(id).await?.map(Json).ok_or(AppError::NotFound)
}

/// POST /api/pets - Create a pet.
///
/// The body is validated before the admin key is checked.
pub(crate) async fn create_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PetInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Pet>), AppError> {
    let Json(input) = payload?;
    let pet = validate_pet(&input)?;
    authorize(state.admin_key.as_ref(), &headers, "POST /api/pets")?;

    let created = state.pets.insert(pet).await?;
    info!(id = created.id, name = %created.name, kind = %created.kind, "pet created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/pets/{id} - Delete a pet.
///
/// Answers 200 whether or not a record existed.
pub(crate) async fn delete_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    authorize(state.admin_key.as_ref(), &headers, "DELETE /api/pets/{id}")?;

    let removed = match parse_id(&id) {
        Some(id) => state.pets.delete(id).await?,
        None => false,
    };
    info!(id = %id, removed, "pet delete requested");
    Ok(Json(json!({ "message": "Pet deleted" })))
}
