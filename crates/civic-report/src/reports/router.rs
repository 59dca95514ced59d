use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CitizenId, ReportDraft, ReportId, ReportStatus, RewardStage};
use super::repository::{ReportStorage, SessionStorage};
use super::service::ReportDeskService;
use crate::session::SessionRecord;

/// Router builder exposing the report desk to the presentation layer.
pub fn report_router<S, N>(service: Arc<ReportDeskService<S, N>>) -> Router
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports",
            post(submit_handler::<S, N>).get(list_handler::<S, N>),
        )
        .route("/api/v1/reports/queue", get(queue_handler::<S, N>))
        .route(
            "/api/v1/reports/:report_id/status",
            post(status_handler::<S, N>),
        )
        .route(
            "/api/v1/reports/:report_id/award",
            post(award_handler::<S, N>),
        )
        .route(
            "/api/v1/citizens/:citizen_id/points",
            get(ledger_handler::<S, N>),
        )
        .route(
            "/api/v1/session",
            get(session_handler::<S, N>)
                .post(sign_in_handler::<S, N>)
                .delete(sign_out_handler::<S, N>),
        )
        .route("/api/v1/detect", post(detect_handler::<S, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChangeRequest {
    pub(crate) status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AwardRequest {
    pub(crate) stage: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetectRequest {
    #[serde(default)]
    pub(crate) image_name: String,
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
    axum::Json(draft): axum::Json<ReportDraft>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.submit(draft) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn list_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.reports() {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn queue_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.triage_queue() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn status_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
    Path(report_id): Path<String>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    let Some(status) = ReportStatus::from_label(&request.status) else {
        let payload = json!({ "error": format!("unknown status '{}'", request.status) });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    };

    match service.transition(&ReportId(report_id), status) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn award_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
    Path(report_id): Path<String>,
    axum::Json(request): axum::Json<AwardRequest>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    // An unrecognized stage name is ineligible, not an error: zero points,
    // no mutation.
    let Some(stage) = RewardStage::from_label(&request.stage) else {
        let payload = json!({ "updated": false, "points_granted": 0 });
        return (StatusCode::OK, axum::Json(payload)).into_response();
    };

    match service.award_stage(&ReportId(report_id), stage) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn ledger_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
    Path(citizen_id): Path<String>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.ledger(&CitizenId(citizen_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn session_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.session() {
        Ok(session) => (StatusCode::OK, axum::Json(json!({ "session": session }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn sign_in_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
    axum::Json(session): axum::Json<SessionRecord>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.sign_in(session.clone()) {
        Ok(()) => (StatusCode::CREATED, axum::Json(session)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn sign_out_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    match service.sign_out() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn detect_handler<S, N>(
    State(service): State<Arc<ReportDeskService<S, N>>>,
    axum::Json(request): axum::Json<DetectRequest>,
) -> Response
where
    S: ReportStorage + 'static,
    N: SessionStorage + 'static,
{
    let outcome = service.mock_detection(&request.image_name);
    (StatusCode::OK, axum::Json(outcome.to_view())).into_response()
}
