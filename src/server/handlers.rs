//! HTTP request handlers
//!
//! Request bodies are optional JSON objects; anything missing falls back
//! to the same defaults a bare request gets.

use super::AppState;
use crate::error::{MappingError, PrefsError};
use crate::mapping::{
    number_to_pattern, parse_number, AutoMapping, ColorSoundResult, DetectedContent,
    PatternResult, TextMapping,
};
use crate::prefs::{Preset, UserKey, UserPreferences};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{self, JoinError};

/// Header carrying the caller's identity
pub const USER_ID_HEADER: &str = "x-user-id";

const DEFAULT_USER: &str = "default";
const DEFAULT_COLOR: &str = "#000000";

/// Failures reported to the client as `{"error": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Prefs(#[from] PrefsError),

    #[error("preference task failed")]
    Task(#[from] JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Mapping(_) | Self::Prefs(_) => StatusCode::BAD_REQUEST,
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A result echoed back with the input that produced it
#[derive(Serialize)]
pub struct WithInput<T> {
    input: Value,
    #[serde(flatten)]
    result: T,
}

#[derive(Serialize)]
pub struct TextResponse {
    input: String,
    scale: String,
    #[serde(flatten)]
    mapping: TextMapping,
}

#[derive(Serialize)]
pub struct PresetsResponse {
    presets: Vec<Preset>,
}

fn body_value(body: Option<Json<Value>>) -> Value {
    body.map(|Json(value)| value).unwrap_or_default()
}

/// Header bytes are hashed as-is, so non-UTF-8 ids still get their own key
fn user_key(headers: &HeaderMap) -> UserKey {
    headers
        .get(USER_ID_HEADER)
        .map(|v| UserKey::from_bytes(v.as_bytes()))
        .unwrap_or_else(|| UserKey::from_identifier(DEFAULT_USER))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "synesthesia-simulator",
    }))
}

pub async fn detect(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<DetectedContent> {
    let body = body_value(body);
    let content = body.get("content").unwrap_or(&Value::Null);
    Json(state.mapper.detect_value(content))
}

pub async fn map_text(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<TextResponse> {
    let body = body_value(body);
    let text = body.get("text").and_then(Value::as_str).unwrap_or_default();
    let requested = body.get("scale").and_then(Value::as_str);
    let scale = state.mapper.resolve_scale(requested);

    Json(TextResponse {
        input: text.to_string(),
        scale: requested.unwrap_or(scale.name()).to_string(),
        mapping: state.mapper.map_text(text, scale),
    })
}

pub async fn map_color(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<WithInput<ColorSoundResult>> {
    let body = body_value(body);
    let input = body
        .get("color")
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_COLOR));
    let result = state.mapper.map_color(input.as_str().unwrap_or_default());
    Json(WithInput { input, result })
}

pub async fn map_number(
    body: Option<Json<Value>>,
) -> Result<Json<WithInput<PatternResult>>, ApiError> {
    let body = body_value(body);
    let raw = body.get("number").cloned().unwrap_or_else(|| Value::from(0));
    let number = parse_number(&raw)?;
    Ok(Json(WithInput {
        input: Value::from(number),
        result: number_to_pattern(number),
    }))
}

pub async fn map_auto(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<AutoMapping> {
    let body = body_value(body);
    let content = body.get("content").unwrap_or(&Value::Null);
    Json(state.mapper.map_auto(content))
}

pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<UserPreferences> {
    Json(state.prefs.get(&user_key(&headers)))
}

pub async fn set_preferences(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<UserPreferences>, ApiError> {
    let partial = match body_value(body) {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    let key = user_key(&headers);
    // Saving may flush to disk
    let prefs = task::spawn_blocking(move || state.prefs.set(&key, &partial)).await??;
    Ok(Json(prefs))
}

pub async fn add_preset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Json<PresetsResponse>, ApiError> {
    let settings = match body_value(body) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let key = user_key(&headers);
    let presets = task::spawn_blocking(move || state.prefs.add_preset(&key, settings)).await?;
    Ok(Json(PresetsResponse { presets }))
}
