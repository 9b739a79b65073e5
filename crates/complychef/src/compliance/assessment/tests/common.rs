use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::compliance::assessment::domain::{
    AnswerStatus, AssessmentAnswer, AssessmentContext, AssessmentRecord, Severity,
};
use crate::compliance::assessment::repository::{AssessmentStore, AssessmentStoreError};
use crate::compliance::assessment::router::assessment_router;
use crate::compliance::assessment::service::AssessmentService;
use crate::compliance::identity::{OrgContext, OrganizationId, UserRef};

pub(super) fn context() -> OrgContext {
    OrgContext::new(
        "harbour-bistro",
        UserRef {
            id: "user-7".to_string(),
            display_name: "Dana Reyes".to_string(),
        },
    )
}

pub(super) fn assessment_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date")
}

pub(super) fn saved_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 9, 17, 45, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn compliant(code: &str) -> AssessmentAnswer {
    AssessmentAnswer {
        item_code: code.to_string(),
        status: AnswerStatus::Compliant,
        severity: None,
        comments: None,
        evidence_flag: None,
    }
}

pub(super) fn not_assessed(code: &str) -> AssessmentAnswer {
    AssessmentAnswer {
        item_code: code.to_string(),
        status: AnswerStatus::NotAssessed,
        severity: None,
        comments: None,
        evidence_flag: None,
    }
}

pub(super) fn non_compliant(code: &str, severity: Severity) -> AssessmentAnswer {
    AssessmentAnswer {
        item_code: code.to_string(),
        status: AnswerStatus::NonCompliant,
        severity: Some(severity),
        comments: None,
        evidence_flag: None,
    }
}

/// Build an answer set with the requested non-compliance counts, drawing
/// item codes from pools whose allowed severities cover the request.
pub(super) fn answers_with(minors: usize, majors: usize, criticals: usize) -> Vec<AssessmentAnswer> {
    let minor_pool = ["FH-01", "FH-03", "CL-01", "PH-02", "WM-01", "DC-01"];
    let major_pool = ["CC-01", "CC-02", "CC-03"];
    let critical_pool = ["TC-04", "PC-01"];

    let mut answers = Vec::new();
    for code in minor_pool.iter().take(minors) {
        answers.push(non_compliant(code, Severity::Minor));
    }
    for code in major_pool.iter().take(majors) {
        answers.push(non_compliant(code, Severity::Major));
    }
    for code in critical_pool.iter().take(criticals) {
        answers.push(non_compliant(code, Severity::Critical));
    }

    answers
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryAssessmentStore>,
    Arc<MemoryAssessmentStore>,
) {
    let store = Arc::new(MemoryAssessmentStore::default());
    let service = AssessmentService::new(store.clone());
    (service, store)
}

pub(super) fn high_risk_service() -> AssessmentService<MemoryAssessmentStore> {
    AssessmentService::with_context(
        Arc::new(MemoryAssessmentStore::default()),
        AssessmentContext {
            high_risk_business: true,
        },
    )
}

pub(super) struct MemoryAssessmentStore {
    pub(super) records: Arc<Mutex<HashMap<(OrganizationId, NaiveDate), AssessmentRecord>>>,
}

impl Default for MemoryAssessmentStore {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl AssessmentStore for MemoryAssessmentStore {
    fn upsert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, AssessmentStoreError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        guard.insert((record.organization.clone(), record.date), record.clone());
        Ok(record)
    }

    fn for_date(
        &self,
        organization: &OrganizationId,
        date: NaiveDate,
    ) -> Result<Option<AssessmentRecord>, AssessmentStoreError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard.get(&(organization.clone(), date)).cloned())
    }

    fn history(
        &self,
        organization: &OrganizationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AssessmentRecord>, AssessmentStoreError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        let mut records: Vec<AssessmentRecord> = guard
            .values()
            .filter(|record| {
                &record.organization == organization && record.date >= from && record.date <= to
            })
            .cloned()
            .collect();
        records.sort_by_key(|record| record.date);
        Ok(records)
    }
}

pub(super) struct UnavailableAssessmentStore;

impl AssessmentStore for UnavailableAssessmentStore {
    fn upsert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, AssessmentStoreError> {
        Err(AssessmentStoreError::Unavailable(
            "database offline".to_string(),
        ))
    }

    fn for_date(
        &self,
        _organization: &OrganizationId,
        _date: NaiveDate,
    ) -> Result<Option<AssessmentRecord>, AssessmentStoreError> {
        Err(AssessmentStoreError::Unavailable(
            "database offline".to_string(),
        ))
    }

    fn history(
        &self,
        _organization: &OrganizationId,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<AssessmentRecord>, AssessmentStoreError> {
        Err(AssessmentStoreError::Unavailable(
            "database offline".to_string(),
        ))
    }
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<MemoryAssessmentStore>,
) -> axum::Router {
    assessment_router(Arc::new(service), context())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body is readable");
    serde_json::from_slice(&body).expect("body is json")
}
