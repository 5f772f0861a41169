//! Audit logging for account lifecycle and access decisions.
//!
//! Events go to the `audit` tracing target so they can be routed separately
//! from request logs. Credentials are never part of an event.
//!
//! # Example
//! ```ignore
//! use axum_helpers::audit::AuditEvent;
//!
//! AuditEvent::success("account.close")
//!     .actor("TaroYamada")
//!     .client_ip(&headers)
//!     .log();
//!
//! AuditEvent::denied("account.read")
//!     .actor("TaroYamada")
//!     .resource("user:HanakoSato")
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// One audit record, built up fluently and emitted with [`AuditEvent::log`].
#[derive(Debug)]
pub struct AuditEvent {
    pub action: &'static str,
    pub outcome: AuditOutcome,
    pub actor: Option<String>,
    pub resource: Option<String>,
    pub ip_address: Option<String>,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(action: &'static str, outcome: AuditOutcome) -> Self {
        Self {
            action,
            outcome,
            actor: None,
            resource: None,
            ip_address: None,
            reason: None,
            timestamp: Utc::now(),
        }
    }

    pub fn success(action: &'static str) -> Self {
        Self::new(action, AuditOutcome::Success)
    }

    pub fn failure(action: &'static str) -> Self {
        Self::new(action, AuditOutcome::Failure)
    }

    pub fn denied(action: &'static str) -> Self {
        Self::new(action, AuditOutcome::Denied)
    }

    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn client_ip(mut self, headers: &HeaderMap) -> Self {
        self.ip_address = extract_ip_from_headers(headers);
        self
    }

    /// Emit the event. Denied and failed actions are logged at WARN.
    pub fn log(self) {
        match self.outcome {
            AuditOutcome::Success => tracing::info!(
                target: "audit",
                action = self.action,
                outcome = ?self.outcome,
                actor = self.actor.as_deref(),
                resource = self.resource.as_deref(),
                ip = self.ip_address.as_deref(),
                timestamp = %self.timestamp,
                "audit event"
            ),
            AuditOutcome::Failure | AuditOutcome::Denied => tracing::warn!(
                target: "audit",
                action = self.action,
                outcome = ?self.outcome,
                actor = self.actor.as_deref(),
                resource = self.resource.as_deref(),
                ip = self.ip_address.as_deref(),
                reason = self.reason.as_deref(),
                timestamp = %self.timestamp,
                "audit event"
            ),
        }
    }
}

/// Client IP from `X-Forwarded-For` (first hop) or `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}
