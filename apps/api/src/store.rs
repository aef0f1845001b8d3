//! In-memory application state shared across handlers.
//!
//! One profile, a history of submitted job descriptions, and the ledger
//! of generation attempts. Handlers clone values out so no lock is held
//! across an LLM round trip.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::email::ApplicationRecord;
use crate::models::job::{JobDescriptor, StoredJob};
use crate::models::profile::ResumeProfile;

#[derive(Default)]
struct StoreInner {
    profile: Option<ResumeProfile>,
    jobs: Vec<StoredJob>,
    applications: Vec<ApplicationRecord>,
}

#[derive(Clone, Default)]
pub struct AppStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_profile(&self, profile: ResumeProfile) {
        self.inner.write().await.profile = Some(profile);
    }

    pub async fn profile(&self) -> Option<ResumeProfile> {
        self.inner.read().await.profile.clone()
    }

    /// Stores a submitted job description and returns it with its
    /// assigned id and timestamp.
    pub async fn submit_job(&self, descriptor: JobDescriptor) -> StoredJob {
        let job = StoredJob {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            descriptor,
        };
        self.inner.write().await.jobs.push(job.clone());
        job
    }

    /// The most recently submitted job, if any.
    pub async fn current_job(&self) -> Option<StoredJob> {
        self.inner.read().await.jobs.last().cloned()
    }

    pub async fn log_application(&self, record: ApplicationRecord) {
        self.inner.write().await.applications.push(record);
    }

    pub async fn applications(&self) -> Vec<ApplicationRecord> {
        self.inner.read().await.applications.clone()
    }
}
