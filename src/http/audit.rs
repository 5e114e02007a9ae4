//! Security audit logging for admin-gated routes.
//!
//! Events go to the `audit` tracing target so they can be filtered or
//! shipped separately (`RUST_LOG=audit=info`).

use tracing::{info, warn};

/// Security audit events that should be logged for monitoring and alerting.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// Failed shared-secret check
    AuthFailure {
        route: &'static str,
        reason: &'static str,
    },
    /// Successful shared-secret check (for correlation)
    AuthSuccess { route: &'static str },
}

/// Log a security audit event with structured fields.
pub fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::AuthFailure { route, reason } => {
            warn!(
                target: "audit",
                event_type = "auth_failure",
                route,
                reason,
                "Authentication failed"
            );
        },
        AuditEvent::AuthSuccess { route } => {
            info!(
                target: "audit",
                event_type = "auth_success",
                route,
                "Authentication succeeded"
            );
        },
    }
}
