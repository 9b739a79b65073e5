use std::sync::Arc;

use chrono::Duration;

use super::common::*;
use crate::compliance::assessment::domain::{Severity, StarRating};
use crate::compliance::assessment::repository::AssessmentStoreError;
use crate::compliance::assessment::service::{
    AssessmentService, AssessmentServiceError, AssessmentValidationError,
};

#[test]
fn save_scores_the_answers_and_stores_the_record() {
    let (service, store) = build_service();

    let mut answers = answers_with(1, 0, 0);
    answers.push(compliant("TC-01"));
    let record = service
        .save(
            &context(),
            assessment_date(),
            answers,
            assessment_date(),
            saved_at(),
        )
        .expect("save accepted");

    assert_eq!(record.predicted_rating, StarRating::Four);
    assert_eq!(record.completed_by.display_name, "Dana Reyes");
    assert_eq!(store.records.lock().expect("mutex").len(), 1);
}

#[test]
fn resaving_the_same_day_replaces_the_record() {
    let (service, store) = build_service();

    service
        .save(
            &context(),
            assessment_date(),
            answers_with(1, 0, 0),
            assessment_date(),
            saved_at(),
        )
        .expect("first save accepted");
    let record = service
        .save(
            &context(),
            assessment_date(),
            answers_with(0, 0, 1),
            assessment_date(),
            saved_at(),
        )
        .expect("resave accepted");

    assert_eq!(record.predicted_rating, StarRating::Two);
    let guard = store.records.lock().expect("mutex");
    assert_eq!(guard.len(), 1);
    let stored = guard
        .get(&(context().organization, assessment_date()))
        .expect("record kept");
    assert_eq!(stored.predicted_rating, StarRating::Two);
}

#[test]
fn earlier_days_are_locked() {
    let (service, store) = build_service();

    let error = service
        .save(
            &context(),
            assessment_date() - Duration::days(1),
            answers_with(0, 0, 0),
            assessment_date(),
            saved_at(),
        )
        .expect_err("historical save rejected");

    match error {
        AssessmentServiceError::Validation(
            AssessmentValidationError::HistoricalAssessmentLocked { date },
        ) => assert_eq!(date, assessment_date() - Duration::days(1)),
        other => panic!("expected locked assessment, got {other:?}"),
    }
    assert!(store.records.lock().expect("mutex").is_empty());
}

#[test]
fn future_days_are_rejected() {
    let (service, _) = build_service();

    let error = service
        .save(
            &context(),
            assessment_date() + Duration::days(1),
            answers_with(0, 0, 0),
            assessment_date(),
            saved_at(),
        )
        .expect_err("future save rejected");

    assert!(matches!(
        error,
        AssessmentServiceError::Validation(AssessmentValidationError::AssessmentDateInFuture {
            ..
        })
    ));
}

#[test]
fn unknown_items_are_rejected() {
    let (service, _) = build_service();

    let error = service
        .save(
            &context(),
            assessment_date(),
            vec![compliant("ZZ-99")],
            assessment_date(),
            saved_at(),
        )
        .expect_err("unknown item rejected");

    match error {
        AssessmentServiceError::Validation(AssessmentValidationError::UnknownItem { code }) => {
            assert_eq!(code, "ZZ-99");
        }
        other => panic!("expected unknown item, got {other:?}"),
    }
}

#[test]
fn duplicate_answers_are_rejected() {
    let (service, _) = build_service();

    let error = service
        .save(
            &context(),
            assessment_date(),
            vec![compliant("TC-01"), compliant("TC-01")],
            assessment_date(),
            saved_at(),
        )
        .expect_err("duplicate answer rejected");

    assert!(matches!(
        error,
        AssessmentServiceError::Validation(AssessmentValidationError::DuplicateAnswer { .. })
    ));
}

#[test]
fn non_compliant_answers_need_a_severity() {
    let (service, _) = build_service();

    let mut answer = non_compliant("TC-01", Severity::Minor);
    answer.severity = None;
    let error = service
        .save(
            &context(),
            assessment_date(),
            vec![answer],
            assessment_date(),
            saved_at(),
        )
        .expect_err("missing severity rejected");

    assert!(matches!(
        error,
        AssessmentServiceError::Validation(AssessmentValidationError::MissingSeverity { .. })
    ));
}

#[test]
fn severity_must_be_allowed_for_the_item() {
    let (service, _) = build_service();

    let error = service
        .save(
            &context(),
            assessment_date(),
            vec![non_compliant("FH-04", Severity::Minor)],
            assessment_date(),
            saved_at(),
        )
        .expect_err("disallowed severity rejected");

    match error {
        AssessmentServiceError::Validation(AssessmentValidationError::SeverityNotAllowed {
            code,
            severity,
        }) => {
            assert_eq!(code, "FH-04");
            assert_eq!(severity, Severity::Minor);
        }
        other => panic!("expected disallowed severity, got {other:?}"),
    }
}

#[test]
fn severity_on_a_compliant_answer_is_rejected() {
    let (service, _) = build_service();

    let mut answer = compliant("TC-01");
    answer.severity = Some(Severity::Minor);
    let error = service
        .save(
            &context(),
            assessment_date(),
            vec![answer],
            assessment_date(),
            saved_at(),
        )
        .expect_err("stray severity rejected");

    assert!(matches!(
        error,
        AssessmentServiceError::Validation(AssessmentValidationError::UnexpectedSeverity { .. })
    ));
}

#[test]
fn high_risk_businesses_must_evidence_flagged_items() {
    let service = high_risk_service();

    let error = service
        .save(
            &context(),
            assessment_date(),
            vec![non_compliant("PC-01", Severity::Major)],
            assessment_date(),
            saved_at(),
        )
        .expect_err("unevidenced finding rejected");
    assert!(matches!(
        error,
        AssessmentServiceError::Validation(AssessmentValidationError::MissingEvidenceFlag { .. })
    ));

    let mut evidenced = non_compliant("PC-01", Severity::Major);
    evidenced.evidence_flag = Some(true);
    service
        .save(
            &context(),
            assessment_date(),
            vec![evidenced],
            assessment_date(),
            saved_at(),
        )
        .expect("evidenced finding accepted");
}

#[test]
fn standard_businesses_do_not_need_the_evidence_flag() {
    let (service, _) = build_service();

    service
        .save(
            &context(),
            assessment_date(),
            vec![non_compliant("PC-01", Severity::Major)],
            assessment_date(),
            saved_at(),
        )
        .expect("save accepted without evidence flag");
}

#[test]
fn predict_is_a_validated_dry_run() {
    let (service, store) = build_service();

    let rating = service
        .predict(&answers_with(0, 1, 0))
        .expect("prediction computes");
    assert_eq!(rating, StarRating::Two);
    assert!(store.records.lock().expect("mutex").is_empty());

    let mut answer = non_compliant("TC-01", Severity::Minor);
    answer.severity = None;
    let error = service
        .predict(&[answer])
        .expect_err("invalid answers rejected");
    assert!(matches!(
        error,
        AssessmentServiceError::Validation(AssessmentValidationError::MissingSeverity { .. })
    ));
}

#[test]
fn history_returns_records_in_the_range() {
    let (service, _) = build_service();

    service
        .save(
            &context(),
            assessment_date(),
            answers_with(1, 0, 0),
            assessment_date(),
            saved_at(),
        )
        .expect("save accepted");

    let history = service
        .history(
            &context(),
            assessment_date() - Duration::days(7),
            assessment_date(),
        )
        .expect("history reads");
    assert_eq!(history.len(), 1);

    let earlier = service
        .history(
            &context(),
            assessment_date() - Duration::days(30),
            assessment_date() - Duration::days(8),
        )
        .expect("history reads");
    assert!(earlier.is_empty());
}

#[test]
fn store_failures_surface_as_store_errors() {
    let service = AssessmentService::new(Arc::new(UnavailableAssessmentStore));

    let error = service
        .save(
            &context(),
            assessment_date(),
            answers_with(0, 0, 0),
            assessment_date(),
            saved_at(),
        )
        .expect_err("offline store surfaces");

    match error {
        AssessmentServiceError::Store(AssessmentStoreError::Unavailable(reason)) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected unavailable store, got {other:?}"),
    }
}
