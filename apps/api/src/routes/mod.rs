pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::matching::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .route("/api/v1/jd/parse", post(handlers::handle_parse_jd))
        .route(
            "/api/v1/resume/skills/normalize",
            post(handlers::handle_normalize_skills),
        )
        .fallback(not_found)
        .with_state(state)
}
