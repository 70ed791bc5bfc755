mod config;
mod db;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod models;
mod notifications;
mod placeholders;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::ExtractionChain;
use crate::jobs::store::PgJobStore;
use crate::llm_client::LlmClient;
use crate::notifications::dispatcher::NotificationDispatcher;
use crate::notifications::mailer::ResendClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast when the job store is not configured
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},validation_audit=info",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillForge API v{}", env!("CARGO_PKG_VERSION"));

    let pool = create_pool(&config.database_url).await?;
    let jobs = Arc::new(PgJobStore::new(pool));

    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())?;
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not set, /extract and presentation emails will fail");
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let mailer = ResendClient::new(
        config.resend_api_key.clone(),
        config.resend_base_url.clone(),
        config.resend_from_email.clone(),
    )?;
    if config.resend_api_key.is_none() {
        warn!("RESEND_API_KEY not set, candidate emails will fail");
    }
    info!("Email sender initialized (from: {})", config.resend_from_email);

    let state = AppState {
        jobs,
        llm: Arc::new(llm),
        notifier: NotificationDispatcher::new(Arc::new(mailer)),
        extractor: Arc::new(ExtractionChain::default()),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
