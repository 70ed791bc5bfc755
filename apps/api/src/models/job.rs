use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::dossier::CompetenceDossier;

/// Lifecycle of a job row. This service only ever writes `Pending`; the
/// export worker moves the row to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

/// Normalized job payload: the known keys are typed, everything else the
/// caller sent is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPayload {
    #[serde(default)]
    pub competence_dossier: CompetenceDossier,
    #[serde(default)]
    pub template_url: Option<Value>,
    #[serde(default)]
    pub organization_name: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobPayload {
    /// Builds the payload from the raw request map. A present dossier is
    /// sanitized through `CompetenceDossier`; an absent one becomes empty.
    pub fn normalize(mut raw: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let competence_dossier = match raw.remove("competence_dossier") {
            Some(Value::Null) | None => CompetenceDossier::default(),
            Some(value) => CompetenceDossier::from_value(value)?,
        };
        let template_url = raw.remove("template_url");
        let organization_name = raw.remove("organization_name");

        Ok(Self {
            competence_dossier,
            template_url,
            organization_name,
            extra: raw,
        })
    }

    /// True when a non-empty organization name was supplied.
    pub fn has_organization_name(&self) -> bool {
        match &self.organization_name {
            Some(Value::String(name)) => !name.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }
}

/// A job ready to be written. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub job_type: String,
    pub user_id: Uuid,
    pub payload: JobPayload,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The columns exposed to polling clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobStatusView {
    pub status: String,
    pub result: Option<Value>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_normalize_fills_missing_dossier() {
        let payload = JobPayload::normalize(as_map(json!({"template_url": "http://x"}))).unwrap();
        assert_eq!(payload.competence_dossier, CompetenceDossier::default());
        assert_eq!(payload.template_url, Some(json!("http://x")));
        assert!(payload.organization_name.is_none());
    }

    #[test]
    fn test_normalize_keeps_unknown_keys() {
        let payload = JobPayload::normalize(as_map(json!({
            "template_url": "http://x",
            "locale": "fr-FR",
            "options": {"watermark": true}
        })))
        .unwrap();
        assert_eq!(payload.extra["locale"], "fr-FR");
        assert_eq!(payload.extra["options"]["watermark"], true);
    }

    #[test]
    fn test_serialized_payload_always_has_known_keys() {
        let payload = JobPayload::normalize(Map::new()).unwrap();
        let out = serde_json::to_value(&payload).unwrap();
        assert!(out["competence_dossier"].is_object());
        assert!(out["template_url"].is_null());
        assert!(out["organization_name"].is_null());
    }

    #[test]
    fn test_normalize_rejects_mistyped_dossier() {
        let raw = as_map(json!({"competence_dossier": {"formations": "none"}}));
        assert!(JobPayload::normalize(raw).is_err());
    }

    #[test]
    fn test_has_organization_name() {
        let with = JobPayload::normalize(as_map(json!({"organization_name": "Acme"}))).unwrap();
        let blank = JobPayload::normalize(as_map(json!({"organization_name": " "}))).unwrap();
        let none = JobPayload::normalize(Map::new()).unwrap();
        assert!(with.has_organization_name());
        assert!(!blank.has_organization_name());
        assert!(!none.has_organization_name());
    }

    #[test]
    fn test_job_status_wire_names() {
        assert_eq!(JobStatus::Pending.as_str(), "pending");
        assert_eq!(serde_json::to_value(JobStatus::Failed).unwrap(), "failed");
    }
}
