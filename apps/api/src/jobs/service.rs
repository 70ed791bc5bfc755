use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::JobStore;
use crate::models::job::{JobPayload, JobStatus, JobStatusView, NewJob};

/// Creates a `pending` job and returns the store-assigned id.
/// The user id is checked before anything is written.
pub async fn create_job(
    store: &dyn JobStore,
    job_type: &str,
    user_id: &str,
    payload: Map<String, Value>,
) -> Result<i64, AppError> {
    let user_id = Uuid::parse_str(user_id)
        .map_err(|_| AppError::Validation("invalid user_id format".to_string()))?;

    let payload = JobPayload::normalize(payload).map_err(|e| {
        AppError::Validation(format!(
            "competence_dossier does not match the expected structure: {e}"
        ))
    })?;

    if payload.has_organization_name() {
        debug!("Organization name present in job payload");
    } else {
        debug!("No organization_name in job payload, the worker will use its default");
    }

    let now = Utc::now();
    let job = NewJob {
        job_type: job_type.to_string(),
        user_id,
        payload,
        status: JobStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let id = store.insert(job).await?;
    info!("Created {job_type} job {id} for user {user_id}");
    Ok(id)
}

/// Reads the client-visible status of a job.
pub async fn get_job_status(store: &dyn JobStore, job_id: &str) -> Result<JobStatusView, AppError> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        return Err(AppError::Validation("job ID is required".to_string()));
    }

    // Ids are numeric; anything else cannot match a row.
    let not_found = || AppError::NotFound(format!("Job {job_id} not found"));
    let id: i64 = job_id.parse().map_err(|_| not_found())?;

    store.find_status(id).await?.ok_or_else(not_found)
}
