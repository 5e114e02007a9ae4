//! Shared-secret gate for pet mutations.

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

use super::audit::{AuditEvent, log_audit_event};
use super::error::AppError;
use crate::constants::API_KEY_HEADER;

/// The configured admin secret.
#[derive(Clone)]
pub struct AdminKey(Arc<str>);

impl AdminKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Constant-time comparison against a presented key.
    pub fn matches(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

// Keeps the secret out of debug logs.
impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminKey(..)")
    }
}

/// Checks the `x-api-key` header. With no key configured every request passes.
pub(crate) fn authorize(
    key: Option<&AdminKey>,
    headers: &HeaderMap,
    route: &'static str,
) -> Result<(), AppError> {
    let Some(key) = key else {
        return Ok(());
    };

    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    match presented {
        Some(presented) if key.matches(presented) => {
            log_audit_event(AuditEvent::AuthSuccess { route });
            Ok(())
        },
        Some(_) => {
            log_audit_event(AuditEvent::AuthFailure {
                route,
                reason: "invalid api key",
            });
            Err(AppError::Unauthorized)
        },
        None => {
            log_audit_event(AuditEvent::AuthFailure {
                route,
                reason: "missing api key",
            });
            Err(AppError::Unauthorized)
        },
    }
}
