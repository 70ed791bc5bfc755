//! Transactional emails: candidate invites, validation notices and
//! presentation emails.
//!
//! All delivery goes through `EmailSender`; templates are plain HTML with
//! `{placeholder}` substitution.

use thiserror::Error;

use crate::llm_client::LlmError;

pub mod audit;
pub mod dispatcher;
pub mod handlers;
pub mod mailer;
pub mod presentation;
pub mod templates;
pub mod validation;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    Validation(String),

    #[error("Completion percentage is {0}%, expected 100%")]
    IncompletePercentage(i64),

    #[error("Validation date must be in RFC3339 format (e.g., 2024-01-05T10:30:00.000Z)")]
    DateFormat,

    #[error("RESEND_API_KEY not set")]
    MissingApiKey,

    #[error("failed to send HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider error (status {status}): {message}")]
    Delivery { status: u16, message: String },

    #[error("failed to decode provider response: {0}")]
    Parse(String),

    #[error("failed to serialize candidate data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("email generation failed: {0}")]
    Generation(#[from] LlmError),
}

impl NotifyError {
    /// Errors caused by the request itself rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NotifyError::Validation(_) | NotifyError::IncompletePercentage(_) | NotifyError::DateFormat
        )
    }
}
