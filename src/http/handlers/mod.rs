//! HTTP route handlers.
//!
//! - `pets` - pet listing, lookup, creation and deletion
//! - `adoptions` - adoption application intake
//! - `health` - liveness report

pub(crate) mod adoptions;
pub(crate) mod health;
pub(crate) mod pets;

use super::error::AppError;

/// Fallback for unknown routes.
pub(crate) async fn not_found() -> AppError {
    AppError::NotFound
}
