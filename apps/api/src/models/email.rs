//! Composed email and application ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fully composed outreach email, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
}

/// One row in the application ledger.
///
/// Appended after every composition attempt that had both input records:
/// `status` is `"generated"` on success, `"failed"` with the error in
/// `notes` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub recipient_email: String,
    pub company: String,
    pub role: String,
    pub subject: String,
    pub status: String,
    pub notes: String,
}

impl ApplicationRecord {
    /// Builds a fresh ledger row stamped with the current time.
    pub fn new(
        recipient_email: impl Into<String>,
        company: impl Into<String>,
        role: impl Into<String>,
        subject: impl Into<String>,
        status: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            recipient_email: recipient_email.into(),
            company: company.into(),
            role: role.into(),
            subject: subject.into(),
            status: status.into(),
            notes: notes.into(),
        }
    }
}
