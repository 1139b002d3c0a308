mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::evidence::{DisabledEvidenceAssessor, EvidenceAssessor, LlmEvidenceAssessor};
use crate::matching::jd_parser::JdParser;
use crate::matching::service::AtsService;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Evidence assessor: LLM-backed when a token is configured
    let assessor: Arc<dyn EvidenceAssessor> = match &config.hf_api_token {
        Some(token) => {
            let llm = LlmClient::new(
                token.clone(),
                config.llm_model.clone(),
                config.llm_api_url.clone(),
            )?;
            info!("LLM client initialized (model: {})", llm.model());
            Arc::new(LlmEvidenceAssessor(llm))
        }
        None => {
            warn!("HF_API_TOKEN not set. Evidence assessment disabled; using fallback evidence.");
            Arc::new(DisabledEvidenceAssessor)
        }
    };

    let ats = Arc::new(AtsService::new(
        JdParser::default(),
        assessor,
        config.scoring.clone(),
        config.evidence_timeout,
    ));
    info!(
        "ATS service initialized (evidence timeout: {}s)",
        config.evidence_timeout.as_secs()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        ats,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
