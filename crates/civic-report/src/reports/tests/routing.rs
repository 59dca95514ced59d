use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::{build_desk, build_desk_with, draft, report};
use crate::reports::domain::ReportStatus;
use crate::reports::router::report_router;

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn post_reports_returns_receipt() {
    let (desk, _, _) = build_desk();
    let router = report_router(Arc::new(desk));

    let payload = serde_json::to_value(draft()).expect("serialize draft");
    let response = router
        .oneshot(json_request("POST", "/api/v1/reports", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json(response).await;
    assert_eq!(body.get("points_granted").and_then(Value::as_u64), Some(10));
    let report = body.get("report").expect("report view");
    assert_eq!(
        report.get("status").and_then(Value::as_str),
        Some("pending")
    );
    assert_eq!(report.get("priority_rank").and_then(Value::as_u64), Some(1));
}

#[tokio::test]
async fn queue_endpoint_lists_ranked_entries() {
    let seed = vec![
        report("rpt-low", 40, ReportStatus::Pending, 0),
        report("rpt-high", 90, ReportStatus::Pending, 1),
        report("rpt-flagged", 99, ReportStatus::Flagged, 2),
    ];
    let (desk, _, _) = build_desk_with(seed);
    let router = report_router(Arc::new(desk));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/reports/queue")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let entries = body.as_array().expect("queue array");
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].get("id").and_then(|id| id.as_str()),
        Some("rpt-high")
    );
    assert_eq!(
        entries[0].get("priority_rank").and_then(Value::as_u64),
        Some(1)
    );
}

#[tokio::test]
async fn unknown_status_label_is_rejected() {
    let (desk, _, _) = build_desk();
    let router = report_router(Arc::new(desk));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/reports/rpt-any/status",
            &json!({ "status": "archived" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn status_change_for_unknown_id_reports_noop() {
    let (desk, _, _) = build_desk();
    let router = report_router(Arc::new(desk));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/reports/rpt-missing/status",
            &json!({ "status": "resolved" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.get("updated").and_then(Value::as_bool), Some(false));
    assert_eq!(body.get("points_granted").and_then(Value::as_u64), Some(0));
}

#[tokio::test]
async fn unknown_award_stage_grants_nothing() {
    let seed = vec![report("rpt-a", 50, ReportStatus::Pending, 0)];
    let (desk, storage, _) = build_desk_with(seed);
    let router = report_router(Arc::new(desk));
    let before = storage.snapshot();

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/reports/rpt-a/award",
            &json!({ "stage": "escalated" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.get("points_granted").and_then(Value::as_u64), Some(0));
    assert_eq!(storage.snapshot(), before);
}

#[tokio::test]
async fn session_endpoints_round_trip() {
    let (desk, _, _) = build_desk();
    let router = report_router(Arc::new(desk));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/session",
            &json!({ "role": "authority", "authority_id": "AUTH-7" }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    let body = read_json(response).await;
    assert_eq!(
        body.pointer("/session/role").and_then(Value::as_str),
        Some("authority")
    );

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    let body = read_json(response).await;
    assert_eq!(body.get("session"), Some(&Value::Null));
}

#[tokio::test]
async fn detect_endpoint_returns_mock_classification() {
    let (desk, _, _) = build_desk();
    let router = report_router(Arc::new(desk));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/detect",
            &json!({ "image_name": "curbside.jpg" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body.get("image_name").and_then(Value::as_str),
        Some("curbside.jpg")
    );
    let severity = body
        .get("severity")
        .and_then(Value::as_u64)
        .expect("severity present");
    assert!(severity <= 100);
    let confidence = body
        .get("confidence_pct")
        .and_then(Value::as_u64)
        .expect("confidence present");
    assert!((55..=99).contains(&confidence));
}
