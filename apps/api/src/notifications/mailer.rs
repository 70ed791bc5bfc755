use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::NotifyError;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement for an accepted email.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, NotifyError>;
}

#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}

/// Resend HTTP API client.
pub struct ResendClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    from: String,
}

impl ResendClient {
    pub fn new(
        api_key: Option<String>,
        base_url: String,
        from: String,
    ) -> Result<Self, NotifyError> {
        Ok(Self {
            client: Client::builder().timeout(SEND_TIMEOUT).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            from,
        })
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, NotifyError> {
        let api_key = self.api_key.as_deref().ok_or(NotifyError::MissingApiKey)?;

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&ResendEmailRequest {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("Resend error response ({status}): {body}");
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(NotifyError::Delivery {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| NotifyError::Parse(e.to_string()))
    }
}
