use chrono::NaiveDate;

use crate::compliance::identity::OrganizationId;

use super::domain::AssessmentRecord;

#[derive(Debug, thiserror::Error)]
pub enum AssessmentStoreError {
    #[error("assessment store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for saved assessments. One record per
/// (organization, date); `upsert` replaces any existing record for the slot.
pub trait AssessmentStore: Send + Sync {
    fn upsert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, AssessmentStoreError>;

    fn for_date(
        &self,
        organization: &OrganizationId,
        date: NaiveDate,
    ) -> Result<Option<AssessmentRecord>, AssessmentStoreError>;

    fn history(
        &self,
        organization: &OrganizationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AssessmentRecord>, AssessmentStoreError>;
}
