//! HTTP API
//!
//! JSON endpoints under `/api`, static frontend files for everything else.

pub mod handlers;

use crate::config::SynesthesiaConfig;
use crate::mapping::ContentMapper;
use crate::prefs::PreferenceStore;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state for all handlers
pub struct AppState {
    pub mapper: ContentMapper,
    pub prefs: PreferenceStore,
}

impl AppState {
    pub fn new(mapper: ContentMapper, prefs: PreferenceStore) -> Self {
        Self { mapper, prefs }
    }

    /// Build state from configuration, opening the preference backend
    pub fn from_config(config: &SynesthesiaConfig) -> Self {
        Self::new(
            ContentMapper::new(config.default_scale()),
            config.preferences.open_store(),
        )
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/detect", post(handlers::detect))
        .route("/api/map/text", post(handlers::map_text))
        .route("/api/map/color", post(handlers::map_color))
        .route("/api/map/number", post(handlers::map_number))
        .route("/api/map/auto", post(handlers::map_auto))
        .route(
            "/api/preferences",
            get(handlers::get_preferences).post(handlers::set_preferences),
        )
        .route("/api/preferences/preset", post(handlers::add_preset))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// Run the server until Ctrl-C
pub async fn serve(config: SynesthesiaConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config));
    tracing::info!(
        backend = state.prefs.backend_name(),
        default_scale = %state.mapper.default_scale(),
        "preferences ready"
    );

    let app = create_router(state, config.server.static_dir.as_deref());
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::ScaleKind;
    use crate::prefs::{JsonFileBackend, UserKey};
    use axum::body::{to_bytes, Body};
    use axum::http::{HeaderValue, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(ContentMapper::default(), PreferenceStore::in_memory());
        create_router(Arc::new(state), None)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_as(user: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("X-User-ID", user)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_as(user: Option<&str>, uri: &str) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header("X-User-ID", user);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get_as(None, "/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "synesthesia-simulator");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_detect() {
        let app = app();
        let (_, body) = send(&app, post("/api/detect", json!({"content": "#FF0000"}))).await;
        assert_eq!(body, json!({"type": "color", "value": "#FF0000"}));

        let (_, body) = send(&app, post("/api/detect", json!({"content": "42"}))).await;
        assert_eq!(body, json!({"type": "number", "value": 42.0}));

        let (_, body) = send(&app, post("/api/detect", json!({"content": "Hello"}))).await;
        assert_eq!(body, json!({"type": "text", "value": "Hello"}));

        let (_, body) = send(&app, post("/api/detect", json!({"content": 7}))).await;
        assert_eq!(body["type"], "unknown");
    }

    #[tokio::test]
    async fn test_detect_without_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/detect")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"type": "unknown", "value": null}));
    }

    #[tokio::test]
    async fn test_map_text() {
        let app = app();
        let (_, body) = send(&app, post("/api/map/text", json!({"text": "ABC"}))).await;
        assert_eq!(body["input"], "ABC");
        assert_eq!(body["scale"], "pentatonic");
        assert_eq!(body["mappings"].as_array().unwrap().len(), 3);
        assert!((body["total_duration"].as_f64().unwrap() - 0.6).abs() < 1e-9);

        let (_, body) = send(
            &app,
            post("/api/map/text", json!({"text": "H", "scale": "major"})),
        )
        .await;
        assert_eq!(body["scale"], "major");
        assert_eq!(body["mappings"][0]["frequency"], 440.0);

        let (_, body) = send(&app, post("/api/map/text", json!({"text": ""}))).await;
        assert_eq!(body["mappings"], json!([]));
    }

    #[tokio::test]
    async fn test_map_text_uses_configured_default_scale() {
        let state = AppState::new(
            ContentMapper::new(ScaleKind::Major),
            PreferenceStore::in_memory(),
        );
        let app = create_router(Arc::new(state), None);
        let (_, body) = send(&app, post("/api/map/text", json!({"text": "H"}))).await;
        assert_eq!(body["scale"], "major");
        assert_eq!(body["mappings"][0]["frequency"], 440.0);
    }

    #[tokio::test]
    async fn test_map_color() {
        let app = app();
        let (_, body) = send(&app, post("/api/map/color", json!({"color": "#FF0000"}))).await;
        assert_eq!(body["input"], "#FF0000");
        assert_eq!(body["frequency"], 200.0);
        assert_eq!(body["waveform"], "sawtooth");
        assert_eq!(body["rgb"], json!({"r": 255, "g": 0, "b": 0}));
        assert_eq!(body["complementary"], "#00ffff");

        let (status, body) = send(&app, post("/api/map/color", json!({"color": "invalid"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Invalid color format");

        let (_, body) = send(&app, post("/api/map/color", json!({}))).await;
        assert_eq!(body["input"], "#000000");
        assert_eq!(body["volume_modifier"], 0.5);
    }

    #[tokio::test]
    async fn test_map_number() {
        let app = app();
        let (status, body) = send(&app, post("/api/map/number", json!({"number": 42}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"], 42.0);
        assert_eq!(body["pattern"], "wave");
        assert!(body["visual"].is_object());

        let (_, body) = send(&app, post("/api/map/number", json!({"number": -5}))).await;
        assert_eq!(body["is_negative"], true);

        let (_, body) = send(&app, post("/api/map/number", json!({"number": "9"}))).await;
        assert_eq!(body["pattern"], "arpeggio");
    }

    #[tokio::test]
    async fn test_map_number_invalid() {
        let (status, body) = send(
            &app(),
            post("/api/map/number", json!({"number": "not a number"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid number");
    }

    #[tokio::test]
    async fn test_map_auto() {
        let app = app();
        let (_, body) = send(&app, post("/api/map/auto", json!({"content": "hello"}))).await;
        assert_eq!(body["detected"]["type"], "text");
        assert!(body["mapping"]["mappings"].is_array());

        let (_, body) = send(&app, post("/api/map/auto", json!({"content": "#00F"}))).await;
        assert_eq!(body["detected"]["type"], "color");
        assert_eq!(body["mapping"]["frequency"], 600.0);

        let (_, body) = send(&app, post("/api/map/auto", json!({"content": "25"}))).await;
        assert_eq!(body["detected"]["type"], "number");
        assert_eq!(body["mapping"]["pattern"], "sweep");

        let (_, body) = send(&app, post("/api/map/auto", json!({"content": ""}))).await;
        assert_eq!(body["detected"]["type"], "unknown");
        assert_eq!(body["mapping"], json!({}));
    }

    #[tokio::test]
    async fn test_preferences_defaults() {
        let (_, body) = send(&app(), get_as(None, "/api/preferences")).await;
        assert_eq!(body["volume"], 50.0);
        assert_eq!(body["speed"], 5.0);
        assert_eq!(body["intensity"], 70.0);
        assert_eq!(body["scale"], "pentatonic");
        assert_eq!(body["presets"], json!([]));
    }

    #[tokio::test]
    async fn test_preferences_per_user() {
        let app = app();
        let (_, body) = send(&app, post_as("alice", "/api/preferences", json!({"volume": 90}))).await;
        assert_eq!(body["volume"], 90.0);

        let (_, body) = send(&app, get_as(Some("alice"), "/api/preferences")).await;
        assert_eq!(body["volume"], 90.0);

        let (_, body) = send(&app, get_as(Some("bob"), "/api/preferences")).await;
        assert_eq!(body["volume"], 50.0);
    }

    #[tokio::test]
    async fn test_preferences_invalid_update() {
        let (status, body) = send(
            &app(),
            post("/api/preferences", json!({"intensity": "extreme"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid preferences"));
    }

    #[tokio::test]
    async fn test_add_preset() {
        let app = app();
        let (_, body) = send(
            &app,
            post_as("carol", "/api/preferences/preset", json!({"name": "Test", "volume": 60})),
        )
        .await;
        let presets = body["presets"].as_array().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0]["name"], "Test");
        assert_eq!(presets[0]["id"].as_str().unwrap().len(), 8);

        let (_, body) = send(&app, get_as(Some("carol"), "/api/preferences")).await;
        assert_eq!(body["presets"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_utf8_user_id_is_its_own_user() {
        let app = app();
        let raw = HeaderValue::from_bytes(&[0xff, 0xfe, b'x']).unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/api/preferences")
            .header("content-type", "application/json")
            .header("X-User-ID", raw.clone())
            .body(Body::from(json!({"volume": 12}).to_string()))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["volume"], 12.0);

        let (_, body) = send(&app, get_as(None, "/api/preferences")).await;
        assert_eq!(body["volume"], 50.0);

        let request = Request::builder()
            .uri("/api/preferences")
            .header("X-User-ID", raw)
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(&app, request).await;
        assert_eq!(body["volume"], 12.0);
    }

    #[tokio::test]
    async fn test_file_backed_preferences() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let state = AppState::new(
            ContentMapper::default(),
            PreferenceStore::new(JsonFileBackend::open(&path)),
        );
        let app = create_router(Arc::new(state), None);

        let (status, _) = send(&app, post_as("dave", "/api/preferences", json!({"speed": 8}))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(
            &app,
            post_as("dave", "/api/preferences/preset", json!({"name": "Calm"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["presets"][0]["name"], "Calm");

        let reopened = PreferenceStore::new(JsonFileBackend::open(&path));
        let prefs = reopened.get(&UserKey::from_identifier("dave"));
        assert_eq!(prefs.presets.len(), 1);
        let (_, body) = send(&app, get_as(Some("dave"), "/api/preferences")).await;
        assert_eq!(body["speed"], 8.0);
    }

    #[tokio::test]
    async fn test_static_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "<html><title>Synesthesia Simulator</title></html>",
        )
        .unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let state = AppState::new(ContentMapper::default(), PreferenceStore::in_memory());
        let app = create_router(Arc::new(state), Some(dir.path()));

        let response = app.clone().oneshot(get_as(None, "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Synesthesia Simulator"));

        let response = app.clone().oneshot(get_as(None, "/style.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_as(None, "/missing.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
