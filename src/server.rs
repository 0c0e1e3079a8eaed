//! Ingestion service
//!
//! Five REST routes over the file-backed store:
//! - `GET  /api/whoop/today`        latest WHOOP payload
//! - `GET  /api/screentime/today`   latest screen-time payload
//! - `POST /api/ingest/whoop`       validated WHOOP ingest
//! - `POST /api/ingest/screentime`  validated screen-time ingest
//! - `GET  /api/debug/latest`       full record including timestamp
//!
//! CORS is fully open. When a bearer token is configured the POST routes
//! require it; the read routes stay open. The original trust model forwarded
//! the token without checking it, which is treated here as a gap rather than
//! behavior to reproduce.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::adapters::{ScreenTimePayload, WhoopPayload};
use crate::error::ScoreError;
use crate::store::{DailyRecord, FileStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<FileStore>>,
    token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: FileStore, token: Option<String>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            token: token.map(Arc::from),
        }
    }
}

#[derive(Debug, Serialize)]
struct IngestRejection {
    ok: bool,
    error: String,
}

type Rejection = (StatusCode, Json<IngestRejection>);

fn rejection(status: StatusCode, error: impl Into<String>) -> Rejection {
    (
        status,
        Json(IngestRejection {
            ok: false,
            error: error.into(),
        }),
    )
}

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/whoop/today", get(whoop_today))
        .route("/api/screentime/today", get(screentime_today))
        .route("/api/ingest/whoop", post(ingest_whoop))
        .route("/api/ingest/screentime", post(ingest_screentime))
        .route("/api/debug/latest", get(debug_latest))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and run the service until shutdown.
pub async fn serve(addr: &str, state: AppState) -> Result<(), ScoreError> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!("ingestion service listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn whoop_today(State(state): State<AppState>) -> Json<WhoopPayload> {
    let record = state.store.lock().await.load();
    Json(record.whoop)
}

async fn screentime_today(State(state): State<AppState>) -> Json<ScreenTimePayload> {
    let record = state.store.lock().await.load();
    Json(record.screentime)
}

async fn debug_latest(State(state): State<AppState>) -> Json<DailyRecord> {
    Json(state.store.lock().await.load())
}

#[derive(Debug, Serialize)]
struct WhoopIngestResponse {
    ok: bool,
    whoop: WhoopPayload,
}

async fn ingest_whoop(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WhoopPayload>,
) -> Result<Json<WhoopIngestResponse>, Rejection> {
    require_token(&state, &headers)?;

    let store = state.store.lock().await;
    let record = store
        .ingest_whoop(payload)
        .map_err(|e| rejection(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!("stored whoop metrics, updated at {}", record.updated_at);
    Ok(Json(WhoopIngestResponse {
        ok: true,
        whoop: record.whoop,
    }))
}

#[derive(Debug, Serialize)]
struct ScreenTimeIngestResponse {
    ok: bool,
    screentime: ScreenTimePayload,
}

async fn ingest_screentime(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ScreenTimePayload>,
) -> Result<Json<ScreenTimeIngestResponse>, Rejection> {
    require_token(&state, &headers)?;

    let store = state.store.lock().await;
    let record = store
        .ingest_screentime(payload)
        .map_err(|e| rejection(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!("stored screen-time metrics, updated at {}", record.updated_at);
    Ok(Json(ScreenTimeIngestResponse {
        ok: true,
        screentime: record.screentime,
    }))
}

fn require_token(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(());
    };

    let supplied = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if supplied == Some(expected) {
        Ok(())
    } else {
        Err(rejection(
            StatusCode::UNAUTHORIZED,
            "Missing or invalid bearer token",
        ))
    }
}
