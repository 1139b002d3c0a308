use std::sync::Arc;

use crate::config::Config;
use crate::matching::service::AtsService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; holds the evidence assessor and scoring config.
    pub ats: Arc<AtsService>,
}
