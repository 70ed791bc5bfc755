use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::models::candidate::CandidateData;
use crate::notifications::dispatcher::{CandidateInviteRequest, CandidateValidationRequest};
use crate::notifications::presentation::send_presentation_email;
use crate::notifications::NotifyError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateEmailRequest {
    #[serde(rename = "candidateData")]
    pub candidate_data: CandidateData,
    pub need: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmailResponse {
    #[serde(rename = "emailContent")]
    pub email_content: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateEmailResponse {
    fn failed(error: String) -> Json<Self> {
        Json(Self {
            email_content: String::new(),
            success: false,
            error: Some(error),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub success: bool,
    pub message: String,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct InviteErrorResponse {
    pub success: bool,
    pub message: String,
    pub error_code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationNotificationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationNotificationResponse {
    fn failed(message: &str, error: String) -> Json<Self> {
        Json(Self {
            success: false,
            message: message.to_string(),
            notification_id: None,
            error: Some(error),
        })
    }
}

/// POST /api/email/generate-presentation
pub async fn handle_generate_presentation(
    State(state): State<AppState>,
    body: Result<Json<GenerateEmailRequest>, JsonRejection>,
) -> (StatusCode, Json<GenerateEmailResponse>) {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                GenerateEmailResponse::failed(format!(
                    "Invalid request payload: {}",
                    rejection.body_text()
                )),
            )
        }
    };

    match send_presentation_email(state.llm.as_ref(), &req.candidate_data, req.need.as_deref())
        .await
    {
        Ok(email_content) => (
            StatusCode::OK,
            Json(GenerateEmailResponse {
                email_content,
                success: true,
                error: None,
            }),
        ),
        Err(e @ NotifyError::Serialize(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            GenerateEmailResponse::failed(format!("Failed to process candidate data: {e}")),
        ),
        Err(e) => {
            error!("Presentation email generation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                GenerateEmailResponse::failed(format!("Failed to generate email: {e}")),
            )
        }
    }
}

/// POST /api/candidates/invite
pub async fn handle_candidate_invite(
    State(state): State<AppState>,
    body: Result<Json<CandidateInviteRequest>, JsonRejection>,
) -> Result<Json<InviteResponse>, (StatusCode, Json<InviteErrorResponse>)> {
    let invalid = || {
        (
            StatusCode::BAD_REQUEST,
            Json(InviteErrorResponse {
                success: false,
                message: "Données de requête invalides".to_string(),
                error_code: "INVALID_REQUEST".to_string(),
            }),
        )
    };

    let Json(req) = body.map_err(|rejection| {
        warn!("Invalid invite payload: {}", rejection.body_text());
        invalid()
    })?;

    match state.notifier.send_candidate_invite(&req).await {
        Ok(outcome) => Ok(Json(InviteResponse {
            success: true,
            message: "Email d'invitation envoyé avec succès".to_string(),
            request_id: outcome.request_id,
        })),
        Err(e) if e.is_client_error() => {
            warn!("Invite rejected: {e}");
            Err(invalid())
        }
        Err(e) => {
            error!("Invite delivery failed for dossier {}: {e}", req.dossier_id);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InviteErrorResponse {
                    success: false,
                    message: "Erreur lors de l'envoi de l'email".to_string(),
                    error_code: "EMAIL_SEND_FAILED".to_string(),
                }),
            ))
        }
    }
}

/// POST /api/candidates/validation-notification
pub async fn handle_validation_notification(
    State(state): State<AppState>,
    body: Result<Json<CandidateValidationRequest>, JsonRejection>,
) -> (StatusCode, Json<ValidationNotificationResponse>) {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                ValidationNotificationResponse::failed(
                    "Invalid request payload",
                    rejection.body_text(),
                ),
            )
        }
    };

    match state.notifier.send_validation_notice(&req).await {
        Ok(notification_id) => (
            StatusCode::OK,
            Json(ValidationNotificationResponse {
                success: true,
                message: "Notification envoyée avec succès".to_string(),
                notification_id: Some(notification_id),
                error: None,
            }),
        ),
        Err(e) => {
            let message = match &e {
                NotifyError::Validation(_) => "Request validation failed",
                NotifyError::IncompletePercentage(_) => {
                    "Notification can only be sent for 100% completion"
                }
                NotifyError::DateFormat => "Invalid validation date format",
                _ => "Failed to send notification email",
            };
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, ValidationNotificationResponse::failed(message, e.to_string()))
        }
    }
}
