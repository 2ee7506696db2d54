use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{CaseId, CaseSubmission, CaseUpdate, NoteRequest};
use super::query::CaseQuery;
use super::repository::{AuditSink, CaseRepository, RepositoryError};
use super::service::{CaseService, CaseServiceError};
use crate::eligibility::ApplicantProfile;

/// Router builder exposing the evaluation, case and admin endpoints.
pub fn case_router<R, A>(service: Arc<CaseService<R, A>>) -> Router
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler::<R, A>))
        .route("/api/v1/cases", post(submit_handler::<R, A>))
        .route("/api/v1/cases/:case_id", get(case_handler::<R, A>))
        .route(
            "/api/v1/cases/:case_id/evaluation",
            get(evaluation_handler::<R, A>),
        )
        .route(
            "/api/v1/cases/:case_id/evaluate",
            post(reevaluate_handler::<R, A>),
        )
        .route("/api/v1/admin/cases", get(list_handler::<R, A>))
        .route("/api/v1/admin/cases/stats", get(stats_handler::<R, A>))
        .route("/api/v1/admin/cases/export", get(export_handler::<R, A>))
        .route(
            "/api/v1/admin/cases/:case_id",
            patch(update_handler::<R, A>),
        )
        .route(
            "/api/v1/admin/cases/:case_id/notes",
            post(note_handler::<R, A>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Json(profile): Json<ApplicantProfile>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    (StatusCode::OK, Json(service.evaluate_profile(&profile))).into_response()
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Json(submission): Json<CaseSubmission>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn case_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.get(&CaseId(case_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluation_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.evaluation(&CaseId(case_id)) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reevaluate_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.reevaluate(&CaseId(case_id)) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Query(query): Query<CaseQuery>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.list(&query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<R, A>(State(service): State<Arc<CaseService<R, A>>>) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.status_counts() {
        Ok(counts) => (StatusCode::OK, Json(json!({ "byStatus": counts }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Query(query): Query<CaseQuery>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.export_csv(&query) {
        Ok(body) => {
            let filename = format!(
                "attachment; filename=\"cases-page{}-{}.csv\"",
                query.page_number(),
                Utc::now().format("%Y-%m-%d")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, filename),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
    Json(update): Json<CaseUpdate>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.update(&CaseId(case_id), update) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn note_handler<R, A>(
    State(service): State<Arc<CaseService<R, A>>>,
    Path(case_id): Path<String>,
    Json(note): Json<NoteRequest>,
) -> Response
where
    R: CaseRepository + 'static,
    A: AuditSink + 'static,
{
    match service.add_note(&CaseId(case_id), note) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CaseServiceError) -> Response {
    let status = match &err {
        CaseServiceError::InvalidProfile(_) | CaseServiceError::EmptyNote => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CaseServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CaseServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CaseServiceError::Repository(RepositoryError::Unavailable(_))
        | CaseServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
