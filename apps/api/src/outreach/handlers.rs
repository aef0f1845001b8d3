//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::email::{ApplicationRecord, EmailMessage};
use crate::outreach::composer::compose_email;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenerateOutreachRequest {
    pub recipient: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOutreachResponse {
    pub status: String,
    #[serde(flatten)]
    pub email: EmailMessage,
}

#[derive(Debug, Serialize)]
pub struct ApplicationsResponse {
    pub total_applications: usize,
    pub applications: Vec<ApplicationRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/outreach/generate
///
/// Generates a cold outreach email from the stored profile and the most
/// recently submitted job. Once both inputs are present the outcome is
/// recorded in the application ledger whether composition succeeds or not.
pub async fn handle_generate_outreach(
    State(state): State<AppState>,
    request: Option<Json<GenerateOutreachRequest>>,
) -> Result<Json<GenerateOutreachResponse>, AppError> {
    let recipient = request.and_then(|Json(r)| r.recipient);

    let profile = state.store.profile().await.ok_or_else(|| {
        AppError::NotFound(
            "Resume profile not found. Submit one via POST /api/v1/profile first.".to_string(),
        )
    })?;
    let job = state.store.current_job().await.ok_or_else(|| {
        AppError::NotFound(
            "Job description not found. Submit one via POST /api/v1/jobs first.".to_string(),
        )
    })?;

    let result = compose_email(
        state.llm.as_ref(),
        &profile,
        &job.descriptor,
        recipient.as_deref(),
        &state.config.sender_email,
    )
    .await;

    match result {
        Ok(email) => {
            state
                .store
                .log_application(ApplicationRecord::new(
                    email.to.clone(),
                    job.descriptor.company.clone(),
                    job.descriptor.role.clone(),
                    email.subject.clone(),
                    "generated",
                    "",
                ))
                .await;

            Ok(Json(GenerateOutreachResponse {
                status: "generated".to_string(),
                email,
            }))
        }
        Err(err) => {
            let notes = match &err {
                AppError::NotFound(msg)
                | AppError::Validation(msg)
                | AppError::Generation(msg) => msg.clone(),
                AppError::Internal(inner) => inner.to_string(),
            };
            state
                .store
                .log_application(ApplicationRecord::new(
                    ledger_recipient(recipient.as_deref(), &job.descriptor.email),
                    job.descriptor.company.clone(),
                    job.descriptor.role.clone(),
                    "",
                    "failed",
                    notes,
                ))
                .await;

            Err(err)
        }
    }
}

/// GET /api/v1/applications
///
/// Full application history, oldest first.
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApplicationsResponse>, AppError> {
    let applications = state.store.applications().await;

    Ok(Json(ApplicationsResponse {
        total_applications: applications.len(),
        applications,
    }))
}

/// Best recipient to record against a failed attempt. Mirrors the
/// composer's precedence but never fails.
fn ledger_recipient(override_addr: Option<&str>, jd_email: &str) -> String {
    match override_addr {
        Some(address) if !address.trim().is_empty() => address.trim().to_string(),
        _ if !jd_email.trim().is_empty() => jd_email.trim().to_string(),
        _ => "unknown".to_string(),
    }
}
