//! Axum route handlers for the isotype HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`  — Returns `{"status": "ok", "version": "0.4.0"}`
//! - `GET  /config`  — Active engine configuration
//! - `POST /profile` — Subjectivity profile and glyph signature for one text
//! - `POST /render`  — Full render plan for participants at given positions

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::IsotypeConfig;
use crate::dataset;
use crate::error::IsotypeError;
use crate::glyph::GlyphSynthesizer;
use crate::noise::NoiseField;
use crate::render::{render_plan, RenderState};
use crate::subject::{Dimension, RawSubject, Subject};

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.to_string() })))
}

fn bad_request(message: impl std::fmt::Display) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message)
}

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Engine configuration; requests may override parts of it per call.
    pub config: Arc<IsotypeConfig>,
}

impl AppState {
    pub fn new(config: IsotypeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(IsotypeConfig::default())
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config", get(config_handler))
        .route("/profile", post(profile_handler))
        .route("/render", post(render_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "isotype",
    }))
}

/// GET /config — the configuration requests run against by default.
async fn config_handler(State(state): State<AppState>) -> Json<IsotypeConfig> {
    Json((*state.config).clone())
}

#[derive(Debug, Deserialize)]
struct ProfileRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "text_content")]
    text: String,
    #[serde(default, alias = "semantic_vector")]
    embedding: Vec<f64>,
    #[serde(default, alias = "emotion_scores")]
    emotions: BTreeMap<String, f64>,
}

/// POST /profile — analyze a single text.
///
/// Request body: `{ "text": "..."?, "embedding": [..]?, "emotions": {..}? }`
///
/// Missing text yields the neutral profile, as in [`crate::subjectivity::extract`].
async fn profile_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: ProfileRequest = serde_json::from_value(body)
        .map_err(|e| bad_request(format!("Invalid profile request: {}", e)))?;

    let raw = RawSubject {
        id: Some(request.id.unwrap_or_else(|| "anonymous".to_string())),
        text_content: Some(request.text),
        embedding: Some(request.embedding),
        emotions: Some(request.emotions),
        ..Default::default()
    };
    let subject = Subject::from_raw(raw, &state.config)
        .ok_or_else(|| bad_request("Profile request id must not be blank"))?;

    let signature = GlyphSynthesizer::new(NoiseField::shared(), &state.config).signature(&subject);
    tracing::debug!(id = %subject.id, "Computed profile");

    Ok(Json(serde_json::json!({
        "id": subject.id,
        "profile": subject.profile,
        "signature": signature,
        "base_color": subject.base_color.to_hex(),
    })))
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    participants: Vec<Value>,
    positions: Vec<RenderState>,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    dimension: Option<Dimension>,
}

/// POST /render — glyphs, edges and clusters for a frame.
///
/// Request body:
/// `{ "participants": [..], "positions": [{"position": {"x", "y"}}, ..],
///    "threshold": 0.8?, "dimension": "semantic"? }`
async fn render_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: RenderRequest = serde_json::from_value(body)
        .map_err(|e| bad_request(format!("Invalid render request: {}", e)))?;

    let mut config = (*state.config).clone();
    if let Some(threshold) = request.threshold {
        config.similarity_threshold = threshold;
    }
    if let Some(dimension) = request.dimension {
        config.dimension = dimension;
    }
    config.validate().map_err(bad_request)?;

    let subjects = dataset::subjects_from_records(request.participants, &config);
    if subjects.is_empty() {
        return Err(bad_request(IsotypeError::EmptyDataset));
    }
    let states = request.positions;

    let result = tokio::task::spawn_blocking(move || {
        render_plan(&subjects, &states, &config, NoiseField::shared())
    })
    .await;

    match result {
        Ok(Ok(plan)) => {
            let value = serde_json::to_value(&plan)
                .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
            Ok(Json(value))
        }
        Ok(Err(error)) => Err(bad_request(error)),
        Err(join_error) => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Render task panicked: {}", join_error),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
