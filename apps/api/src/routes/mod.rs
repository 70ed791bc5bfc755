pub mod health;

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::extraction::handlers as extraction;
use crate::jobs::handlers as jobs;
use crate::notifications::handlers as notifications;
use crate::state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // CV upload and structuring
        .route("/extract", post(extraction::handle_extract))
        // Export jobs
        .route("/jobs", post(jobs::handle_create_job))
        .route("/jobs/:id/status", get(jobs::handle_job_status))
        // Emails
        .route(
            "/api/email/generate-presentation",
            post(notifications::handle_generate_presentation),
        )
        .route(
            "/api/candidates/invite",
            post(notifications::handle_candidate_invite),
        )
        .route(
            "/api/candidates/validation-notification",
            post(notifications::handle_validation_notification),
        )
        .layer(body_limit)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("apikey"),
            HeaderName::from_static("x-client-info"),
        ])
        .expose_headers([CONTENT_LENGTH])
        .max_age(CORS_MAX_AGE)
}
