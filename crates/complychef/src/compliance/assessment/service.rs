use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::compliance::identity::OrgContext;

use super::checklist::AssessmentChecklist;
use super::domain::{
    AnswerStatus, AssessmentAnswer, AssessmentContext, AssessmentRecord, Severity, StarRating,
};
use super::repository::{AssessmentStore, AssessmentStoreError};
use super::scoring::predict_rating;

/// Validation errors raised while saving or scoring an assessment.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentValidationError {
    #[error("unknown checklist item '{code}'")]
    UnknownItem { code: String },
    #[error("item '{code}' is answered more than once")]
    DuplicateAnswer { code: String },
    #[error("a severity is required when item '{code}' is marked non-compliant")]
    MissingSeverity { code: String },
    #[error("severity '{}' is not permitted for item '{code}'", .severity.label())]
    SeverityNotAllowed { code: String, severity: Severity },
    #[error("item '{code}' carries a severity but is not marked non-compliant")]
    UnexpectedSeverity { code: String },
    #[error("item '{code}' requires an evidence flag for high-risk businesses")]
    MissingEvidenceFlag { code: String },
    #[error("assessment for {date} is locked; earlier days can no longer be edited")]
    HistoricalAssessmentLocked { date: NaiveDate },
    #[error("assessment date {date} is in the future")]
    AssessmentDateInFuture { date: NaiveDate },
}

/// Service validating checklist answers, deriving the predicted rating, and
/// upserting the day's assessment.
pub struct AssessmentService<S> {
    store: Arc<S>,
    checklist: AssessmentChecklist,
    context: AssessmentContext,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_context(store, AssessmentContext::default())
    }

    pub fn with_context(store: Arc<S>, context: AssessmentContext) -> Self {
        Self {
            store,
            checklist: AssessmentChecklist::standard(),
            context,
        }
    }

    pub fn checklist(&self) -> &AssessmentChecklist {
        &self.checklist
    }

    /// Validate and save the day's assessment. Only the current day is
    /// writable: earlier assessments are immutable history, later dates are
    /// rejected outright. Resaving the same day replaces the earlier record.
    pub fn save(
        &self,
        context: &OrgContext,
        date: NaiveDate,
        answers: Vec<AssessmentAnswer>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        if date < today {
            return Err(AssessmentValidationError::HistoricalAssessmentLocked { date }.into());
        }
        if date > today {
            return Err(AssessmentValidationError::AssessmentDateInFuture { date }.into());
        }
        self.validate_answers(&answers)?;

        let predicted_rating = predict_rating(&answers);
        let record = AssessmentRecord {
            organization: context.organization.clone(),
            date,
            answers,
            predicted_rating,
            completed_by: context.user.clone(),
            saved_at: now,
        };

        let stored = self.store.upsert(record)?;
        Ok(stored)
    }

    pub fn for_date(
        &self,
        context: &OrgContext,
        date: NaiveDate,
    ) -> Result<Option<AssessmentRecord>, AssessmentServiceError> {
        let record = self.store.for_date(&context.organization, date)?;
        Ok(record)
    }

    pub fn history(
        &self,
        context: &OrgContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        let records = self.store.history(&context.organization, from, to)?;
        Ok(records)
    }

    /// Dry-run rating for the current form state, with the same answer
    /// validation a save performs but no date rule and no write.
    pub fn predict(
        &self,
        answers: &[AssessmentAnswer],
    ) -> Result<StarRating, AssessmentServiceError> {
        self.validate_answers(answers)?;
        Ok(predict_rating(answers))
    }

    fn validate_answers(
        &self,
        answers: &[AssessmentAnswer],
    ) -> Result<(), AssessmentValidationError> {
        let mut seen = HashSet::new();
        for answer in answers {
            let item = self.checklist.item(&answer.item_code).ok_or_else(|| {
                AssessmentValidationError::UnknownItem {
                    code: answer.item_code.clone(),
                }
            })?;
            if !seen.insert(item.code) {
                return Err(AssessmentValidationError::DuplicateAnswer {
                    code: answer.item_code.clone(),
                });
            }

            match (answer.status, answer.severity) {
                (AnswerStatus::NonCompliant, None) => {
                    return Err(AssessmentValidationError::MissingSeverity {
                        code: answer.item_code.clone(),
                    });
                }
                (AnswerStatus::NonCompliant, Some(severity)) => {
                    if !item.allows(severity) {
                        return Err(AssessmentValidationError::SeverityNotAllowed {
                            code: answer.item_code.clone(),
                            severity,
                        });
                    }
                }
                (_, Some(_)) => {
                    return Err(AssessmentValidationError::UnexpectedSeverity {
                        code: answer.item_code.clone(),
                    });
                }
                (_, None) => {}
            }

            if self.context.high_risk_business
                && item.evidence_required_high_risk
                && answer.status == AnswerStatus::NonCompliant
                && answer.evidence_flag.is_none()
            {
                return Err(AssessmentValidationError::MissingEvidenceFlag {
                    code: answer.item_code.clone(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] AssessmentValidationError),
    #[error(transparent)]
    Store(#[from] AssessmentStoreError),
}
