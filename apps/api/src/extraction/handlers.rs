use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use bytes::Bytes;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::llm_client::structure_cv;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /extract
/// Multipart upload with a `file` field. Responds with the model's JSON,
/// passed through unchanged.
#[instrument(skip(state, multipart))]
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    info!(filename = %filename, bytes = data.len(), "CV upload received");

    let chain = state.extractor.clone();
    let name = filename.clone();
    let text = tokio::task::spawn_blocking(move || chain.extract(&data, &name))
        .await
        .map_err(|e| AppError::Upstream(format!("text extraction task failed: {e}")))?;

    let extraction_json = json!({ "text": text }).to_string();
    let structured = structure_cv(state.llm.as_ref(), &extraction_json).await?;
    info!(filename = %filename, chars = structured.len(), "CV structured");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        structured,
    ))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read multipart: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("cannot read file: {e}")))?;
        return Ok((filename, data));
    }
    Err(AppError::Validation("file not provided".to_string()))
}
