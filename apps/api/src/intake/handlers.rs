//! Axum route handlers for profile and job intake.

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobDescriptor;
use crate::models::profile::ResumeProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitJobResponse {
    pub job_id: Uuid,
    pub descriptor: JobDescriptor,
}

/// POST /api/v1/profile
///
/// Stores the structured resume profile used by all later generation.
/// Replaces any previously stored profile.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Json(profile): Json<ResumeProfile>,
) -> Result<Json<ResumeProfile>, AppError> {
    let profile = profile.normalized();
    if profile.is_blank() {
        return Err(AppError::Validation("Resume profile is empty".to_string()));
    }

    state.store.set_profile(profile.clone()).await;

    Ok(Json(profile))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ResumeProfile>, AppError> {
    state.store.profile().await.map(Json).ok_or_else(|| {
        AppError::NotFound(
            "Resume profile not found. Submit one via POST /api/v1/profile first.".to_string(),
        )
    })
}

/// POST /api/v1/jobs
///
/// Appends a job description to the history; the most recent submission
/// becomes the current job for outreach generation.
pub async fn handle_submit_job(
    State(state): State<AppState>,
    Json(descriptor): Json<JobDescriptor>,
) -> Result<Json<SubmitJobResponse>, AppError> {
    let descriptor = descriptor.normalized();
    if descriptor.is_blank() {
        return Err(AppError::Validation("Job description is empty".to_string()));
    }

    let stored = state.store.submit_job(descriptor).await;

    Ok(Json(SubmitJobResponse {
        job_id: stored.id,
        descriptor: stored.descriptor,
    }))
}
