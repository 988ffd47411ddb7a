use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::llm::GeminiModel;
use crate::loader::WebLoader;
use crate::search::DdgSearch;

pub mod handlers;
pub mod models;

/// Shared request-handling state. `analyzer` is None when the process started
/// without a credential; requests then fail fast as not configured.
pub struct AppState {
    pub analyzer: Option<Analyzer>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<AppState> {
        let analyzer = match &config.google_api_key {
            Some(key) => Some(Analyzer::new(
                Box::new(DdgSearch::new()?),
                Box::new(WebLoader::new()?),
                Box::new(GeminiModel::new(key.clone())?),
            )),
            None => {
                tracing::error!(
                    "GOOGLE_API_KEY not set; analyze requests will fail until it is configured"
                );
                None
            }
        };
        Ok(AppState { analyzer })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(handlers::analyze_handler))
        .route("/", get(handlers::status_handler))
        .with_state(state)
        .layer(cors)
}
