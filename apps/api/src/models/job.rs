//! Job posting records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::strip_list;

/// Structured description of one job posting.
///
/// Missing fields deserialize to empty values, same contract as
/// `ResumeProfile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescriptor {
    pub company: String,
    pub role: String,
    pub summary: String,
    pub key_skills: Vec<String>,
    /// Contact address lifted from the posting, if any.
    pub email: String,
    pub raw_text: String,
}

impl JobDescriptor {
    /// Returns a copy with every string trimmed and blank skills dropped.
    pub fn normalized(&self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
            summary: self.summary.trim().to_string(),
            key_skills: strip_list(&self.key_skills),
            email: self.email.trim().to_string(),
            raw_text: self.raw_text.trim().to_string(),
        }
    }

    /// True when the record carries no usable content at all.
    pub fn is_blank(&self) -> bool {
        self.company.trim().is_empty()
            && self.role.trim().is_empty()
            && self.summary.trim().is_empty()
            && self.email.trim().is_empty()
            && self.raw_text.trim().is_empty()
            && self.key_skills.iter().all(|skill| skill.trim().is_empty())
    }
}

/// A submitted job posting with server-side bookkeeping.
///
/// The latest `StoredJob` is the one outreach generation runs against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredJob {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub descriptor: JobDescriptor,
}
