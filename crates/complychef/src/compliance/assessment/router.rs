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

use super::domain::AssessmentAnswer;
use super::eligibility::{evaluate_green_shield, GreenShieldInputs};
use super::repository::AssessmentStore;
use super::service::{AssessmentService, AssessmentServiceError, AssessmentValidationError};

pub struct AssessmentState<S> {
    pub service: Arc<AssessmentService<S>>,
    pub context: OrgContext,
}

impl<S> Clone for AssessmentState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            context: self.context.clone(),
        }
    }
}

/// Router builder exposing the self-assessment endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>, context: OrgContext) -> Router
where
    S: AssessmentStore + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(save_handler::<S>))
        .route("/api/v1/assessments/predict", post(predict_handler::<S>))
        .route(
            "/api/v1/assessments/green-shield",
            post(green_shield_handler::<S>),
        )
        .route("/api/v1/assessments/:date", get(fetch_handler::<S>))
        .with_state(AssessmentState { service, context })
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveAssessmentRequest {
    pub(crate) date: NaiveDate,
    pub(crate) answers: Vec<AssessmentAnswer>,
}

pub(crate) async fn save_handler<S>(
    State(state): State<AssessmentState<S>>,
    axum::Json(request): axum::Json<SaveAssessmentRequest>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let now = Utc::now();
    match state.service.save(
        &state.context,
        request.date,
        request.answers,
        now.date_naive(),
        now,
    ) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(AssessmentServiceError::Validation(
            error @ AssessmentValidationError::HistoricalAssessmentLocked { .. },
        )) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Validation(error)) => {
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

pub(crate) async fn fetch_handler<S>(
    State(state): State<AssessmentState<S>>,
    Path(date): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        let payload = json!({
            "error": format!("invalid date '{date}', expected YYYY-MM-DD"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match state.service.for_date(&state.context, date) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no assessment saved for {date}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
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
pub(crate) struct PredictRequest {
    pub(crate) answers: Vec<AssessmentAnswer>,
}

pub(crate) async fn predict_handler<S>(
    State(state): State<AssessmentState<S>>,
    axum::Json(request): axum::Json<PredictRequest>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match state.service.predict(&request.answers) {
        Ok(rating) => {
            let payload = json!({
                "predicted_rating": rating.value(),
                "rating_label": rating.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Validation(error)) => {
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

pub(crate) async fn green_shield_handler<S>(
    State(_state): State<AssessmentState<S>>,
    axum::Json(inputs): axum::Json<GreenShieldInputs>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    (StatusCode::OK, axum::Json(evaluate_green_shield(&inputs))).into_response()
}
