use tracing::info;

use super::NotifyError;
use crate::llm_client::{presentation_email, CompletionProvider};
use crate::models::candidate::CandidateData;

/// Generates the text of a presentation email for a candidate.
/// A missing need is sent to the model as an empty section.
pub async fn send_presentation_email(
    llm: &dyn CompletionProvider,
    candidate: &CandidateData,
    need: Option<&str>,
) -> Result<String, NotifyError> {
    let candidate_json = serde_json::to_string_pretty(candidate)?;
    let need = need.unwrap_or_default();

    let content = presentation_email(llm, &candidate_json, need).await?;
    info!(
        tailored = !need.is_empty(),
        chars = content.chars().count(),
        "Presentation email generated"
    );
    Ok(content)
}
