use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::models::job::{JobStatusView, NewJob};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("insert returned no row")]
    NoRowReturned,
}

/// Persistence seam for job rows. Only creation and status reads are
/// exposed; status transitions belong to the export worker.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Writes exactly one row and returns its store-assigned id.
    async fn insert(&self, job: NewJob) -> Result<i64, StoreError>;

    async fn find_status(&self, id: i64) -> Result<Option<JobStatusView>, StoreError>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn insert(&self, job: NewJob) -> Result<i64, StoreError> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO jobs (type, user_id, payload, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&job.job_type)
        .bind(job.user_id)
        .bind(Json(&job.payload))
        .bind(job.status.as_str())
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        let id = id.ok_or(StoreError::NoRowReturned)?;
        info!("Inserted job {id} (type {}) for user {}", job.job_type, job.user_id);
        Ok(id)
    }

    async fn find_status(&self, id: i64) -> Result<Option<JobStatusView>, StoreError> {
        Ok(sqlx::query_as::<_, JobStatusView>(
            "SELECT status, result, error FROM jobs WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
