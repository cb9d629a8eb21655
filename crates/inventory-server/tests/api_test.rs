//! HTTP-level tests driving the router over an in-memory SQLite database

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use domain::{BusinessCalendar, FixedClock};
use inventory_server::api::create_router;
use inventory_server::state::AppState;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const NOW: &str = "2024-03-15T10:00:00Z";

async fn test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let now: DateTime<Utc> = NOW.parse().unwrap();
    let state = AppState::from_database(
        db,
        Arc::new(FixedClock(now)),
        BusinessCalendar::utc(),
        10_000,
    );
    create_router(Arc::new(state), None)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_session(app: &Router) -> i64 {
    let (status, body) = send(app, post_empty("/api/sessions")).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn scan_body(device: &str, session_id: i64, model: &str, color: &str, grade: &str) -> Value {
    json!({
        "device_id": device,
        "session_id": session_id,
        "attributes": {
            "brand": "Apple",
            "model": model,
            "capacity": "64GB",
            "color": color,
            "grade": grade
        }
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_create_and_list_sessions() {
    let app = test_app().await;

    let (status, body) = send(&app, post_empty("/api/sessions")).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(
        body["message"],
        json!(format!("New inventory session #{} created", id))
    );
    assert!(body["date"].is_string());

    let (status, body) = send(&app, get("/api/sessions")).await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"].as_i64(), Some(id));
    assert_eq!(sessions[0]["scan_count"].as_u64(), Some(0));
}

#[tokio::test]
async fn test_record_scan_and_duplicate() {
    let app = test_app().await;
    let session = create_session(&app).await;

    let (status, body) = send(
        &app,
        post_json("/api/scans", scan_body("111", session, "iPhone 12", "Noir", "A")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("+1 (Apple iPhone 12)"));
    assert_eq!(body["scan"]["device_id"], json!("111"));
    assert_eq!(body["scan"]["status"], json!("Disponible"));
    assert_eq!(body["scan"]["quantity"], json!(1));

    let (status, body) = send(
        &app,
        post_json("/api/scans", scan_body("111", session, "iPhone 12", "Noir", "A")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already been scanned"));

    let (status, body) = send(&app, get(&format!("/api/sessions/{}/count", session))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "count": 1 }));
}

#[tokio::test]
async fn test_same_device_in_another_session() {
    let app = test_app().await;
    let first = create_session(&app).await;
    let second = create_session(&app).await;

    for session in [first, second] {
        let (status, _) = send(
            &app,
            post_json("/api/scans", scan_body("111", session, "iPhone 12", "Noir", "A")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_scan_validation_errors() {
    let app = test_app().await;
    let session = create_session(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/scans",
            json!({ "device_id": "111", "session_id": "abc", "attributes": {} }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        post_json("/api/scans", json!({ "session_id": session, "attributes": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json("/api/scans", json!({ "device_id": "111", "session_id": session })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri("/api/scans")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, get("/api/sessions/abc/count")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_count_for_unassigned_id_is_zero() {
    let app = test_app().await;

    for id in ["0", "-4", "999"] {
        let (status, body) = send(&app, get(&format!("/api/sessions/{}/count", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "count": 0 }));
    }
}

#[tokio::test]
async fn test_scan_into_unknown_session() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        post_json("/api/scans", scan_body("111", 999, "iPhone 12", "Noir", "A")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summary_resolves_today() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/summary")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let session = create_session(&app).await;
    for (device, grade) in [("111", "A"), ("222", "A"), ("333", "B")] {
        send(
            &app,
            post_json("/api/scans", scan_body(device, session, "iPhone 12", "Noir", grade)),
        )
        .await;
    }

    let (status, body) = send(&app, get("/api/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"].as_i64(), Some(session));
    assert_eq!(body["grand_total"], json!(3));
    assert_eq!(body["grade_totals"]["A"], json!(2));
    assert_eq!(body["grade_totals"]["B"], json!(1));
    assert_eq!(body["groups"].as_array().unwrap().len(), 2);
    assert_eq!(body["details"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, get(&format!("/api/summary?session_id={}", session))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grand_total"], json!(3));
}

#[tokio::test]
async fn test_summary_of_empty_session() {
    let app = test_app().await;
    let session = create_session(&app).await;

    let (status, body) = send(&app, get(&format!("/api/summary?session_id={}", session))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grand_total"], json!(0));
    assert!(body["groups"].as_array().unwrap().is_empty());
    assert!(body["message"].is_string());

    let (status, _) = send(&app, get("/api/summary?session_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_export_csv() {
    let app = test_app().await;
    let session = create_session(&app).await;
    send(
        &app,
        post_json("/api/scans", scan_body("111", session, "iPhone 12", "Noir", "A")),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get(&format!("/api/summary/export.csv?session_id={}", session)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("device_id,brand,model,capacity,color,grade,status,quantity,scanned_at")
    );
    assert!(lines.next().unwrap().starts_with("111,Apple,iPhone 12,64GB,Noir,A,Disponible,1,"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_device_lookup() {
    let app = test_app().await;
    let session = create_session(&app).await;

    let (status, _) = send(&app, get("/api/devices/111")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        post_json("/api/scans", scan_body("111", session, "iPhone 12", "Noir", "A")),
    )
    .await;

    let (status, body) = send(&app, get("/api/devices/111")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"].as_i64(), Some(session));
    assert_eq!(body["model"], json!("iPhone 12"));

    let (status, _) = send(&app, get("/api/devices/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_and_listing() {
    let app = test_app().await;
    let session = create_session(&app).await;

    for (device, model, color) in [
        ("1", "iPhone 12", "Noir"),
        ("2", "iPhone 12", "Blanc"),
        ("3", "Galaxy S21", "Noir"),
    ] {
        send(
            &app,
            post_json("/api/scans", scan_body(device, session, model, color, "A")),
        )
        .await;
    }

    let (status, body) = send(&app, get("/api/report")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"]["iPhone 12"], json!(2));
    assert_eq!(body["models"]["Galaxy S21"], json!(1));
    assert_eq!(body["most_frequent_model"], json!("iPhone 12"));
    assert_eq!(body["least_frequent_model"], json!("Galaxy S21"));
    assert_eq!(body["most_frequent_color"], json!("Noir"));
    assert_eq!(body["sessions_per_month"]["2024-03"], json!(1));
    assert_eq!(body["truncated"], json!(false));

    let (status, body) = send(&app, get("/api/report?model=galaxy&date=2024-03-15")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_count"], json!(1));

    let (status, body) = send(&app, get("/api/report?date=2024-03-16")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_count"], json!(0));
    assert_eq!(body["most_frequent_model"], Value::Null);

    let (status, body) = send(&app, get("/api/scans?model=iphone")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0]["session_date"].is_string());

    let (status, _) = send(&app, get("/api/report?date=15/03/2024")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
