use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::data_models::AnalysisResponse;
use crate::error::AnalyzeError;

use super::AppState;
use super::models::{ErrorBody, QueryRequest, StatusResponse};

pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ErrorBody>)> {
    let Some(analyzer) = state.analyzer.as_ref() else {
        return Err(error_response(AnalyzeError::NotConfigured));
    };

    let response = analyzer
        .analyze(&request.query, &request.chat_history)
        .await
        .map_err(error_response)?;

    Ok(Json(response))
}

pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "Geolens analyzer API is running.",
    })
}

fn error_response(error: AnalyzeError) -> (StatusCode, Json<ErrorBody>) {
    tracing::error!("analyze request failed: {error}");
    (
        error.status(),
        Json(ErrorBody {
            detail: error.to_string(),
        }),
    )
}
