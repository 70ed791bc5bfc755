use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::dispatcher::CandidateValidationRequest;
use super::NotifyError;

/// One line of the validation-notification audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationAuditEntry {
    pub timestamp: DateTime<Utc>,
    pub candidate_id: String,
    pub inviter_email: String,
    pub dossier_id: String,
    pub organization_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
}

impl ValidationAuditEntry {
    pub fn from_attempt(
        req: &CandidateValidationRequest,
        outcome: &Result<String, NotifyError>,
    ) -> Self {
        let (success, error_message, notification_id) = match outcome {
            Ok(id) => (true, None, Some(id.clone())),
            Err(e) => (false, Some(e.to_string()), None),
        };
        Self {
            timestamp: Utc::now(),
            candidate_id: req.candidate_id.clone(),
            inviter_email: req.inviter_email.clone(),
            dossier_id: req.dossier_id.clone(),
            organization_id: req.organization_id.clone(),
            success,
            error_message,
            notification_id,
        }
    }
}

/// Writes the entry to the `validation_audit` log target. Never fails the caller.
pub fn record(entry: &ValidationAuditEntry) {
    match serde_json::to_string(entry) {
        Ok(line) if entry.success => info!(target: "validation_audit", "{line}"),
        Ok(line) => warn!(target: "validation_audit", "{line}"),
        Err(e) => error!("Failed to serialize validation audit entry: {e}"),
    }
}
