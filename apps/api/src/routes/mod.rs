pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::intake::handlers as intake;
use crate::outreach::handlers as outreach;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Intake API
        .route(
            "/api/v1/profile",
            post(intake::handle_submit_profile).get(intake::handle_get_profile),
        )
        .route("/api/v1/jobs", post(intake::handle_submit_job))
        // Outreach API
        .route(
            "/api/v1/outreach/generate",
            post(outreach::handle_generate_outreach),
        )
        .route(
            "/api/v1/applications",
            get(outreach::handle_list_applications),
        )
        .with_state(state)
}
