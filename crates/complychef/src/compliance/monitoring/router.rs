use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::compliance::identity::OrgContext;

use super::domain::{CheckRecord, CheckSubmission, Shift};
use super::repository::{CheckRecordStore, ComplianceConfigSource, StoreError};
use super::service::{MonitoringServiceError, ShiftMonitoringService};

/// Shared state for the monitoring endpoints: the service plus the caller
/// identity records are attributed to.
pub struct MonitoringState<R, C> {
    pub service: Arc<ShiftMonitoringService<R, C>>,
    pub context: OrgContext,
}

impl<R, C> Clone for MonitoringState<R, C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            context: self.context.clone(),
        }
    }
}

/// Router builder exposing HTTP endpoints for check logging and shift status.
pub fn monitoring_router<R, C>(
    service: Arc<ShiftMonitoringService<R, C>>,
    context: OrgContext,
) -> Router
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
{
    Router::new()
        .route("/api/v1/monitoring/checks", post(log_check_handler::<R, C>))
        .route(
            "/api/v1/monitoring/shifts/:date/:shift",
            get(shift_status_handler::<R, C>),
        )
        .route(
            "/api/v1/monitoring/history",
            post(history_handler::<R, C>),
        )
        .route(
            "/api/v1/monitoring/probe-imports",
            post(probe_import_handler::<R, C>),
        )
        .with_state(MonitoringState { service, context })
}

pub(crate) async fn log_check_handler<R, C>(
    State(state): State<MonitoringState<R, C>>,
    axum::Json(submission): axum::Json<CheckSubmission>,
) -> Response
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
{
    match state
        .service
        .log_check(&state.context, submission, Utc::now())
    {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(MonitoringServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(MonitoringServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({
                "status": "already_logged",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn shift_status_handler<R, C>(
    State(state): State<MonitoringState<R, C>>,
    Path((date, shift)): Path<(String, String)>,
) -> Response
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
{
    let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        let payload = json!({
            "error": format!("invalid date '{date}', expected YYYY-MM-DD"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };
    let Some(shift) = Shift::parse(&shift) else {
        let payload = json!({
            "error": format!("invalid shift '{shift}', expected am or pm"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match state.service.shift_status(&state.context, date, shift) {
        Ok(report) => (StatusCode::OK, axum::Json(report.summary())).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryRequest {
    pub(crate) from: NaiveDate,
    pub(crate) to: NaiveDate,
}

pub(crate) async fn history_handler<R, C>(
    State(state): State<MonitoringState<R, C>>,
    axum::Json(request): axum::Json<HistoryRequest>,
) -> Response
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
{
    match state.service.history(&state.context, request.from, request.to) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(CheckRecord::view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProbeImportRequest {
    pub(crate) date: NaiveDate,
    pub(crate) csv: String,
}

pub(crate) async fn probe_import_handler<R, C>(
    State(state): State<MonitoringState<R, C>>,
    axum::Json(request): axum::Json<ProbeImportRequest>,
) -> Response
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
{
    let reader = Cursor::new(request.csv.into_bytes());
    match state
        .service
        .import_probe_log(&state.context, reader, request.date, Utc::now())
    {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(MonitoringServiceError::Import(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(MonitoringServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
