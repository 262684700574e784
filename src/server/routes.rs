//! Axum route handlers for the director HTTP server.
//!
//! # Routes
//!
//! - `GET    /health`               — Returns `{"status": "ok", "version": ...}`
//! - `POST   /analyze`              — Observation against the default session
//! - `POST   /evaluate`             — Stateless decision from a caller snapshot
//! - `GET    /sessions`             — List session ids
//! - `POST   /sessions`             — Create a session, returns its id
//! - `GET    /sessions/:id`         — Current profile of a session
//! - `DELETE /sessions/:id`         — Forget a session
//! - `POST   /sessions/:id/analyze` — Observation against a named session

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::payload::{decode, ObservationPayload};
use crate::config::DirectorConfig;
use crate::director::{Director, DirectorError, DirectorInstructions, SessionRecord};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub director: Arc<Director>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_director(Director::default())
    }

    pub fn with_director(director: Director) -> Self {
        Self {
            director: Arc::new(director),
        }
    }

    pub fn from_config(config: &DirectorConfig) -> Self {
        Self::with_director(config.build_director())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for DirectorError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::NOT_FOUND
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

type Payload = Result<Json<ObservationPayload>, JsonRejection>;

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/sessions", get(list_sessions_handler).post(create_session_handler))
        .route(
            "/sessions/:id",
            get(get_session_handler).delete(reset_session_handler),
        )
        .route("/sessions/:id/analyze", post(analyze_session_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "anomaly-director",
        "sessions": state.director.store().len(),
    }))
}

fn observe(state: &AppState, session: &str, payload: Payload) -> Result<DirectorInstructions, DirectorError> {
    let obs = decode(payload).map_err(|e| {
        tracing::warn!(session, error = %e, "rejected observation");
        e
    })?;

    let outcome = state.director.observe(session, &obs);

    tracing::info!(
        session,
        floor = ?obs.floor,
        logic = outcome.profile.logic_confidence,
        trust = outcome.profile.trust_level,
        adaptability = outcome.profile.adaptability,
        samples = outcome.profile.samples,
        "player state"
    );
    tracing::info!(
        session,
        rule = outcome.rule,
        level = %outcome.instructions.anomaly_level,
        probability = outcome.instructions.anomaly_probability,
        category = %outcome.instructions.anomaly_category,
        lie_allowed = outcome.instructions.lie_allowed,
        "director order"
    );

    Ok(outcome.instructions)
}

/// POST /analyze — fold an observation into the default session.
///
/// Request:  `{ "correct": bool, "repetition": int, "hesitation": float, "floor"?: int }`
/// Response: `DirectorInstructions`
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<DirectorInstructions>, DirectorError> {
    let session = state.director.default_session().to_string();
    observe(&state, &session, payload).map(Json)
}

/// POST /sessions/:id/analyze — fold an observation into a named session.
async fn analyze_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Payload,
) -> Result<Json<DirectorInstructions>, DirectorError> {
    observe(&state, &id, payload).map(Json)
}

/// POST /evaluate — decide from the caller's own snapshot, no memory.
///
/// Request: observation plus `logic_confidence` and `trust_level`.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<DirectorInstructions>, DirectorError> {
    let obs = decode(payload)?;
    let instructions = state.director.evaluate(&obs)?;

    tracing::info!(
        logic = ?obs.logic_confidence,
        trust = ?obs.trust_level,
        level = %instructions.anomaly_level,
        probability = instructions.anomaly_probability,
        "stateless director order"
    );

    Ok(Json(instructions))
}

/// GET /sessions — list known session ids.
async fn list_sessions_handler(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({ "sessions": state.director.store().session_ids() }))
}

/// POST /sessions — start a fresh session.
async fn create_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    let id = uuid::Uuid::new_v4().to_string();
    state.director.store().create(&id);
    tracing::info!(session = %id, "session created");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "session_id": id })),
    )
}

/// GET /sessions/:id — current profile.
async fn get_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionRecord>, DirectorError> {
    state.director.session(&id).map(Json)
}

/// DELETE /sessions/:id — forget a session.
async fn reset_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DirectorError> {
    let record = state.director.reset(&id)?;
    tracing::info!(session = %id, samples = record.profile.samples, "session reset");
    Ok(Json(serde_json::json!({
        "status": "reset",
        "session_id": id,
        "samples": record.profile.samples,
    })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
