use axum::{
    Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use application::{ScanQuery, ScanRequest};
use domain::{DeviceId, DomainError, SessionId};

use crate::error::ApiError;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route("/api/sessions/{id}/count", get(count_scans))
        .route("/api/scans", get(list_scans).post(record_scan))
        .route("/api/devices/{device_id}", get(lookup_device))
        .route("/api/summary", get(get_summary))
        .route("/api/summary/export.csv", get(export_summary))
        .route("/api/report", get(get_report))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let router = match static_dir {
        Some(dir) => {
            let index = std::path::Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        None => router,
    };

    router.with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn create_session(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let created = state.sessions.create_session().await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_sessions(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.list_sessions().await?;
    Ok(Json(json!({ "sessions": sessions })))
}

async fn count_scans(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = SessionId::parse(&id)?;
    let count = state.sessions.count_scans(session_id).await?;
    Ok(Json(json!({ "count": count })))
}

async fn record_scan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Payload(e.body_text()))?;
    let request = ScanRequest::from_json(&body)?;

    let recorded = state.recorder.record_scan(request).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

async fn list_scans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let scans = state.recorder.list_scans(&query).await?;
    Ok(Json(scans))
}

async fn lookup_device(
    Path(raw): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let device_id = DeviceId::new(&raw)?;
    let scan = state.recorder.lookup_device(&device_id).await?;
    Ok(Json(scan))
}

#[derive(Debug, Default, Deserialize)]
struct SummaryParams {
    session_id: Option<String>,
}

impl SummaryParams {
    /// Blank means "today's session"
    fn session_id(&self) -> Result<Option<SessionId>, DomainError> {
        match self.session_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => SessionId::parse(raw).map(Some),
            _ => Ok(None),
        }
    }
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.summaries.summarize(params.session_id()?).await?;
    Ok(Json(summary))
}

async fn export_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.summaries.summarize(params.session_id()?).await?;
    let body = infrastructure::export::detail_csv(&summary.details)
        .map_err(|e| ApiError::Internal(format!("CSV export failed: {}", e)))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"session-{}.csv\"",
                summary.session_id
            ),
        ),
    ];
    Ok((headers, body))
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.reports.report(&query).await?;
    Ok(Json(report))
}
