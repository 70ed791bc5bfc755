use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::jobs::service::{create_job, get_job_status};
use crate::models::job::JobStatusView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    #[serde(rename = "type")]
    pub job_type: String,
    pub payload: Map<String, Value>,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: i64,
}

/// POST /jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    body: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    let Json(req) = body?;
    if req.job_type.trim().is_empty() {
        return Err(AppError::Validation("type cannot be empty".to_string()));
    }

    let job_id = create_job(state.jobs.as_ref(), &req.job_type, &req.user_id, req.payload).await?;
    Ok((StatusCode::CREATED, Json(CreateJobResponse { job_id })))
}

/// GET /jobs/:id/status
pub async fn handle_job_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobStatusView>, AppError> {
    let view = get_job_status(state.jobs.as_ref(), &id).await?;
    Ok(Json(view))
}
