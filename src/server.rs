//! Web endpoint
//!
//! The thin presentation layer in front of the engine: a single
//! `POST /count` route that validates the two required fields, triggers
//! indexing of the URL, and returns the neighborhood count for the keyword.
//!
//! Response shapes:
//! - success: `{"result": {"count": N}}`
//! - validation failure: `{"errors": [{"message": "Missing required field: url"}]}`

use crate::config::Config;
use crate::engine::Engine;
use crate::Result;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub max_depth: u32,
}

#[derive(Debug, Deserialize)]
pub struct CountRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResult {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CountResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorMessage>>,
}

/// Builds the application router
pub fn build_app(engine: Engine, max_depth: u32) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/count", post(count_handler))
        .with_state(AppState { engine, max_depth })
}

/// Binds the configured address and serves the count endpoint until the
/// process exits
pub async fn serve(engine: Engine, config: &Config) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("listening on {}", config.server.bind_address);
    axum::serve(listener, build_app(engine, config.crawler.max_depth)).await?;
    Ok(())
}

async fn count_handler(
    State(state): State<AppState>,
    Json(request): Json<CountRequest>,
) -> Json<CountResponse> {
    let mut errors = Vec::new();
    if request.url.as_deref().map_or(true, str::is_empty) {
        errors.push(ErrorMessage {
            message: "Missing required field: url".to_string(),
        });
    }
    if request.keyword.as_deref().map_or(true, str::is_empty) {
        errors.push(ErrorMessage {
            message: "Missing required field: keyword".to_string(),
        });
    }
    if !errors.is_empty() {
        return Json(CountResponse {
            result: None,
            errors: Some(errors),
        });
    }

    // Both present, checked above
    let url = request.url.unwrap_or_default();
    let keyword = request.keyword.unwrap_or_default();

    state.engine.index(&url, state.max_depth).await;
    let count = state.engine.count(&url, &keyword, state.max_depth).await;

    Json(CountResponse {
        result: Some(CountResult { count }),
        errors: None,
    })
}
