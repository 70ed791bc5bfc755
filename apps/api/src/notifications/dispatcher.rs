use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::audit::{self, ValidationAuditEntry};
use super::mailer::{EmailSender, OutgoingEmail};
use super::templates::{self, ValidationFields};
use super::validation::{
    format_date_fr, is_valid_email, is_valid_url, is_valid_uuid, parse_validation_date,
};
use super::NotifyError;

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateInviteRequest {
    pub inviter_email: String,
    pub recipient_email: String,
    pub candidate_link: String,
    pub dossier_id: String,
    pub candidate_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateValidationRequest {
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub organization_id: String,
    pub organization_name: String,
    pub inviter_id: String,
    pub inviter_email: String,
    #[serde(default)]
    pub inviter_name: String,
    pub dossier_id: String,
    pub completion_percentage: i64,
    pub validation_date: String,
    pub dossier_url: String,
}

#[derive(Debug, Clone)]
pub struct InviteOutcome {
    pub request_id: String,
    pub email_id: String,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn EmailSender>,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    pub async fn send_candidate_invite(
        &self,
        req: &CandidateInviteRequest,
    ) -> Result<InviteOutcome, NotifyError> {
        validate_invite(req)?;

        let request_id = Uuid::new_v4().to_string();
        let receipt = self
            .sender
            .send(OutgoingEmail {
                to: req.recipient_email.clone(),
                subject: templates::INVITE_SUBJECT.to_string(),
                html: templates::render_invite(&req.inviter_email, &req.candidate_link),
            })
            .await?;

        info!(
            "Invite {request_id} sent to {} for dossier {} (email {})",
            req.recipient_email, req.dossier_id, receipt.id
        );
        Ok(InviteOutcome {
            request_id,
            email_id: receipt.id,
        })
    }

    /// Notifies the inviter that a candidate validated their dossier.
    /// Every attempt is written to the audit trail, whatever the outcome.
    pub async fn send_validation_notice(
        &self,
        req: &CandidateValidationRequest,
    ) -> Result<String, NotifyError> {
        let outcome = self.deliver_validation_notice(req).await;
        if let Err(e) = &outcome {
            warn!("Validation notice for dossier {} not sent: {e}", req.dossier_id);
        }
        audit::record(&ValidationAuditEntry::from_attempt(req, &outcome));
        outcome
    }

    async fn deliver_validation_notice(
        &self,
        req: &CandidateValidationRequest,
    ) -> Result<String, NotifyError> {
        validate_validation(req)?;

        if req.completion_percentage != 100 {
            return Err(NotifyError::IncompletePercentage(req.completion_percentage));
        }

        let date = parse_validation_date(&req.validation_date)?;
        let formatted_date = format_date_fr(&date);

        let html = templates::render_validation(&ValidationFields {
            candidate_name: &req.candidate_name,
            candidate_email: &req.candidate_email,
            organization_name: &req.organization_name,
            validation_date: &formatted_date,
            dossier_url: &req.dossier_url,
        });

        let receipt = self
            .sender
            .send(OutgoingEmail {
                to: req.inviter_email.clone(),
                subject: templates::validation_subject(&req.candidate_name),
                html,
            })
            .await?;

        let notification_id = Uuid::new_v4().to_string();
        info!(
            "Validation notice {notification_id} sent to {} for dossier {} (email {})",
            req.inviter_email, req.dossier_id, receipt.id
        );
        Ok(notification_id)
    }
}

fn validate_invite(req: &CandidateInviteRequest) -> Result<(), NotifyError> {
    if !is_valid_email(&req.inviter_email) {
        return Err(NotifyError::Validation("invalid inviter_email".to_string()));
    }
    if !is_valid_email(&req.recipient_email) {
        return Err(NotifyError::Validation("invalid recipient_email".to_string()));
    }
    if !is_valid_url(&req.candidate_link) {
        return Err(NotifyError::Validation("invalid candidate_link".to_string()));
    }
    if req.dossier_id.trim().is_empty() || req.candidate_id.trim().is_empty() {
        return Err(NotifyError::Validation(
            "dossier_id and candidate_id are required".to_string(),
        ));
    }
    Ok(())
}

fn validate_validation(req: &CandidateValidationRequest) -> Result<(), NotifyError> {
    let ids = [
        ("candidate_id", &req.candidate_id),
        ("organization_id", &req.organization_id),
        ("inviter_id", &req.inviter_id),
        ("dossier_id", &req.dossier_id),
    ];
    for (field, value) in ids {
        if !is_valid_uuid(value) {
            return Err(NotifyError::Validation(format!("{field} must be a UUID")));
        }
    }

    if req.candidate_name.trim().is_empty() {
        return Err(NotifyError::Validation("candidate_name is required".to_string()));
    }
    if req.organization_name.trim().is_empty() {
        return Err(NotifyError::Validation("organization_name is required".to_string()));
    }
    if !is_valid_email(&req.candidate_email) {
        return Err(NotifyError::Validation("invalid candidate_email".to_string()));
    }
    if !is_valid_email(&req.inviter_email) {
        return Err(NotifyError::Validation("invalid inviter_email".to_string()));
    }
    if !is_valid_url(&req.dossier_url) {
        return Err(NotifyError::Validation("invalid dossier_url".to_string()));
    }
    if !(0..=100).contains(&req.completion_percentage) {
        return Err(NotifyError::Validation(
            "completion_percentage must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::notifications::mailer::DeliveryReceipt;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every email instead of delivering it.
    #[derive(Default)]
    pub(crate) struct RecordingSender {
        pub sent: Mutex<Vec<OutgoingEmail>>,
        pub fail: bool,
    }

    impl RecordingSender {
        pub fn calls(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EmailSender for RecordingSender {
        async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, NotifyError> {
            self.sent.lock().unwrap().push(email);
            if self.fail {
                return Err(NotifyError::Delivery {
                    status: 422,
                    message: "domain not verified".to_string(),
                });
            }
            Ok(DeliveryReceipt {
                id: "re_123".to_string(),
            })
        }
    }

    pub(crate) fn validation_request() -> CandidateValidationRequest {
        CandidateValidationRequest {
            candidate_id: "0b8a6c8e-2f1d-4f4a-8d7e-1c2b3a4d5e6f".to_string(),
            candidate_name: "Nora Benali".to_string(),
            candidate_email: "nora@mail.fr".to_string(),
            organization_id: "1c9b7d9f-3a2e-4b5b-9e8f-2d3c4b5e6f70".to_string(),
            organization_name: "Acme".to_string(),
            inviter_id: "2dac8ea0-4b3f-4c6c-8f90-3e4d5c6f7081".to_string(),
            inviter_email: "rh@acme.fr".to_string(),
            inviter_name: "Claire".to_string(),
            dossier_id: "3ebd9fb1-5c40-4d7d-9a01-4f5e6d708192".to_string(),
            completion_percentage: 100,
            validation_date: "2024-01-05T10:30:00.000Z".to_string(),
            dossier_url: "https://app.getskillforge.app/dossiers/3ebd9fb1".to_string(),
        }
    }

    pub(crate) fn invite_request() -> CandidateInviteRequest {
        CandidateInviteRequest {
            inviter_email: "rh@acme.fr".to_string(),
            recipient_email: "nora@mail.fr".to_string(),
            candidate_link: "https://app.getskillforge.app/c/42".to_string(),
            dossier_id: "d-42".to_string(),
            candidate_id: "c-42".to_string(),
        }
    }

    fn dispatcher(sender: Arc<RecordingSender>) -> NotificationDispatcher {
        NotificationDispatcher::new(sender)
    }

    /// Log sink for the `validation_audit` target.
    #[derive(Clone, Default)]
    struct AuditLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for AuditLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl AuditLog {
        fn entries(&self) -> Vec<serde_json::Value> {
            let raw = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
            raw.lines()
                .filter_map(|line| line.find('{').map(|i| &line[i..]))
                .map(|json| serde_json::from_str(json).unwrap())
                .collect()
        }
    }

    fn capture_audit() -> (AuditLog, tracing::subscriber::DefaultGuard) {
        let log = AuditLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("validation_audit=info")
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        (log, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn test_invite_goes_to_recipient() {
        let sender = Arc::new(RecordingSender::default());
        let outcome = dispatcher(sender.clone())
            .send_candidate_invite(&invite_request())
            .await
            .unwrap();

        assert_eq!(outcome.email_id, "re_123");
        assert!(Uuid::parse_str(&outcome.request_id).is_ok());
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent[0].to, "nora@mail.fr");
        assert_eq!(sent[0].subject, templates::INVITE_SUBJECT);
        assert!(sent[0].html.contains("rh@acme.fr"));
    }

    #[tokio::test]
    async fn test_invite_with_bad_link_is_not_sent() {
        let sender = Arc::new(RecordingSender::default());
        let mut req = invite_request();
        req.candidate_link = "app.getskillforge.app/c/42".to_string();

        let err = dispatcher(sender.clone())
            .send_candidate_invite(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Validation(_)));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_notice_goes_to_inviter() {
        let sender = Arc::new(RecordingSender::default());
        let id = dispatcher(sender.clone())
            .send_validation_notice(&validation_request())
            .await
            .unwrap();

        assert!(Uuid::parse_str(&id).is_ok());
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "rh@acme.fr");
        assert_eq!(sent[0].subject, "✅ Dossier de compétences validé - Nora Benali");
        assert!(sent[0].html.contains("5 janvier 2024 à 10h30"));
    }

    #[tokio::test]
    async fn test_incomplete_dossier_is_never_sent() {
        let sender = Arc::new(RecordingSender::default());
        let mut req = validation_request();
        req.completion_percentage = 99;

        let err = dispatcher(sender.clone())
            .send_validation_notice(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::IncompletePercentage(99)));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_notice_is_audited() {
        let (log, _guard) = capture_audit();
        let sender = Arc::new(RecordingSender::default());
        let mut req = validation_request();
        req.completion_percentage = 99;

        dispatcher(sender)
            .send_validation_notice(&req)
            .await
            .unwrap_err();

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["success"], false);
        assert_eq!(entries[0]["dossier_id"], req.dossier_id.as_str());
        assert_eq!(entries[0]["inviter_email"], "rh@acme.fr");
        assert!(entries[0]["error_message"]
            .as_str()
            .unwrap()
            .contains("99%"));
        assert!(entries[0].get("notification_id").is_none());
    }

    #[tokio::test]
    async fn test_delivered_notice_is_audited() {
        let (log, _guard) = capture_audit();
        let sender = Arc::new(RecordingSender::default());

        let id = dispatcher(sender)
            .send_validation_notice(&validation_request())
            .await
            .unwrap();

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["success"], true);
        assert_eq!(entries[0]["notification_id"], id.as_str());
        assert!(entries[0].get("error_message").is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_percentage_is_a_validation_error() {
        let sender = Arc::new(RecordingSender::default());
        let mut req = validation_request();
        req.completion_percentage = 150;

        let err = dispatcher(sender.clone())
            .send_validation_notice(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Validation(_)));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected_before_delivery() {
        let sender = Arc::new(RecordingSender::default());
        let mut req = validation_request();
        req.validation_date = "2024-01-05".to_string();

        let err = dispatcher(sender.clone())
            .send_validation_notice(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::DateFormat));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_uuid_ids_are_rejected() {
        let sender = Arc::new(RecordingSender::default());
        let mut req = validation_request();
        req.dossier_id = "42".to_string();

        let err = dispatcher(sender.clone())
            .send_validation_notice(&req)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dossier_id"));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let err = dispatcher(sender.clone())
            .send_validation_notice(&validation_request())
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Delivery { status: 422, .. }));
        assert!(!err.is_client_error());
        assert_eq!(sender.calls(), 1);
    }
}
