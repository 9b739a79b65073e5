use crate::infra::{
    demo_context, deserialize_date, AppState, InMemoryCheckRecordStore, InMemoryComplianceConfig,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

use complychef::compliance::assessment::{assessment_router, AssessmentService, AssessmentStore};
use complychef::compliance::identity::OrgContext;
use complychef::compliance::monitoring::completion::{CheckCompletionView, SectionProgressEntry};
use complychef::compliance::monitoring::{
    monitoring_router, CheckCatalog, CheckRecordStore, ComplianceConfigSource, ComplianceSection,
    ProbeImportOutcome, Shift, ShiftMonitoringService,
};
use complychef::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct ShiftReportRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) date: NaiveDate,
    pub(crate) shift: Shift,
    #[serde(default)]
    pub(crate) probe_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShiftReportResponse {
    pub(crate) date: NaiveDate,
    pub(crate) shift_label: &'static str,
    pub(crate) data_source: ShiftDataSource,
    pub(crate) complete: bool,
    pub(crate) has_failures: bool,
    pub(crate) sections: Vec<SectionProgressEntry>,
    pub(crate) checks: Vec<CheckCompletionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) import: Option<ProbeImportOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ShiftDataSource {
    Probe,
    Blank,
}

pub(crate) fn with_compliance_routes<R, C, S>(
    monitoring: Arc<ShiftMonitoringService<R, C>>,
    assessments: Arc<AssessmentService<S>>,
    context: OrgContext,
) -> axum::Router
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
    S: AssessmentStore + 'static,
{
    monitoring_router(monitoring, context.clone())
        .merge(assessment_router(assessments, context))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/monitoring/catalog",
            axum::routing::get(catalog_endpoint),
        )
        .route(
            "/api/v1/reports/shift",
            axum::routing::post(shift_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The full check catalog grouped by section, for clients rendering the
/// diary screens.
pub(crate) async fn catalog_endpoint() -> Json<serde_json::Value> {
    let catalog = CheckCatalog::standard();
    let sections: Vec<serde_json::Value> = ComplianceSection::ordered()
        .into_iter()
        .map(|section| {
            let checks: Vec<serde_json::Value> = catalog
                .for_section(section)
                .map(|definition| json!({ "key": definition.key, "name": definition.name }))
                .collect();
            json!({ "section": section.label(), "checks": checks })
        })
        .collect();

    Json(json!({ "sections": sections }))
}

/// Builds a one-off shift completion report, optionally hydrated from a
/// probe CSV export. Nothing is persisted; the endpoint exists for demos
/// and for previewing an import before filing it.
pub(crate) async fn shift_report_endpoint(
    Json(payload): Json<ShiftReportRequest>,
) -> Result<Json<ShiftReportResponse>, AppError> {
    let ShiftReportRequest {
        date,
        shift,
        probe_csv,
    } = payload;

    let store = Arc::new(InMemoryCheckRecordStore::default());
    let config = Arc::new(InMemoryComplianceConfig::default());
    let service = ShiftMonitoringService::new(store, config);
    let context = demo_context();

    let (import, data_source) = match probe_csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            let outcome = service.import_probe_log(&context, reader, date, Utc::now())?;
            (Some(outcome), ShiftDataSource::Probe)
        }
        None => (None, ShiftDataSource::Blank),
    };

    let report = service.shift_status(&context, date, shift)?;
    let summary = report.summary();

    Ok(Json(ShiftReportResponse {
        date,
        shift_label: summary.shift_label,
        data_source,
        complete: summary.complete,
        has_failures: summary.has_failures,
        sections: summary.sections,
        checks: summary.checks,
        import,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date")
    }

    #[tokio::test]
    async fn shift_report_endpoint_returns_blank_checklist() {
        let request = ShiftReportRequest {
            date: report_date(),
            shift: Shift::Am,
            probe_csv: None,
        };

        let Json(body) = shift_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, ShiftDataSource::Blank);
        assert_eq!(body.shift_label, "AM");
        assert!(!body.complete);
        assert!(body.import.is_none());
        assert_eq!(body.sections.len(), 6);
    }

    #[tokio::test]
    async fn shift_report_endpoint_files_probe_readings() {
        let request = ShiftReportRequest {
            date: report_date(),
            shift: Shift::Am,
            probe_csv: Some(
                "Sensor,Recorded At,Temperature C\nWalk-in Fridge,2026-03-09T07:30:00Z,4.1\n"
                    .to_string(),
            ),
        };

        let Json(body) = shift_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, ShiftDataSource::Probe);
        let import = body.import.expect("import outcome returned");
        assert_eq!(import.accepted, 1);

        let fridge = body
            .checks
            .iter()
            .find(|check| check.key == "fridge_temperature")
            .expect("fridge check present");
        assert_eq!(fridge.outstanding, vec!["Prep Fridge".to_string()]);
    }

    #[tokio::test]
    async fn catalog_endpoint_lists_every_section() {
        let Json(body) = catalog_endpoint().await;

        let sections = body
            .get("sections")
            .and_then(serde_json::Value::as_array)
            .expect("sections array");
        assert_eq!(sections.len(), 6);

        let total_checks: usize = sections
            .iter()
            .filter_map(|section| section.get("checks").and_then(serde_json::Value::as_array))
            .map(Vec::len)
            .sum();
        assert_eq!(total_checks, 17);
    }
}
