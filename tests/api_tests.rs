use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use geolens::api::AppState;
use geolens::api::handlers::{analyze_handler, status_handler};
use geolens::api::models::QueryRequest;
use geolens::config::Config;

#[tokio::test]
async fn test_missing_credential_fails_every_analyze_request() {
    // A config without a key builds a state with no analyzer; no search or
    // model call is ever attempted.
    let config = Config {
        google_api_key: None,
        bind_addr: "127.0.0.1:0".to_string(),
    };
    let state = Arc::new(AppState::from_config(&config).expect("state should build"));
    assert!(state.analyzer.is_none());

    let request = QueryRequest {
        query: "gold price".to_string(),
        chat_history: Vec::new(),
    };

    let (status, Json(body)) = analyze_handler(State(state), Json(request))
        .await
        .expect_err("must fail without a credential");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.detail.contains("not initialized"));
}

#[tokio::test]
async fn test_configured_state_builds_analyzer() {
    let config = Config {
        google_api_key: Some("test-key".to_string()),
        bind_addr: "127.0.0.1:0".to_string(),
    };
    let state = AppState::from_config(&config).expect("state should build");
    assert!(state.analyzer.is_some());
}

#[tokio::test]
async fn test_status_endpoint_payload() {
    let Json(body) = status_handler().await;
    assert_eq!(body.status, "ok");
}
