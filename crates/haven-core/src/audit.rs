use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    AdoptionRequestCreated,
    AdoptionRequestProcessed,
    AdoptionRequestCancelled,
    InvoiceIssued,
    PaymentRecorded,
    InvoiceCancelled,
}

/// Fire-and-forget trail entry emitted after a mutation commits. Losing one
/// must never roll back or fail the business transaction that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub user_id: Uuid,
    pub action: AuditAction,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(user_id: Uuid, action: AuditAction, description: impl Into<String>) -> Self {
        Self {
            user_id,
            action,
            description: description.into(),
            occurred_at: Utc::now(),
        }
    }
}
