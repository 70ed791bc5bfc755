use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ExtractionChain;
use crate::jobs::store::JobStore;
use crate::llm_client::CompletionProvider;
use crate::notifications::dispatcher::NotificationDispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Job table access. `PgJobStore` in production.
    pub jobs: Arc<dyn JobStore>,
    /// Chat-completion provider used for CV structuring and presentation emails.
    pub llm: Arc<dyn CompletionProvider>,
    pub notifier: NotificationDispatcher,
    /// Blocking; always run through `spawn_blocking`.
    pub extractor: Arc<ExtractionChain>,
    pub config: Config,
}
