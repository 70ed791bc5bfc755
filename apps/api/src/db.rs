use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to the job store. Built once at startup and shared through
/// `PgJobStore`.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to the job store...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .context("failed to connect to the job store")?;

    let has_jobs_table: bool =
        sqlx::query_scalar("SELECT to_regclass('public.jobs') IS NOT NULL")
            .fetch_one(&pool)
            .await
            .context("failed to inspect the job store schema")?;
    if has_jobs_table {
        info!("Job store ready");
    } else {
        warn!("Table `jobs` not found; apply apps/api/migrations before creating jobs");
    }

    Ok(pool)
}
