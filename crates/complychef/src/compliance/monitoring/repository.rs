use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::compliance::identity::OrganizationId;

use super::catalog::ComplianceSection;
use super::domain::{CheckRecord, EquipmentInstance, Shift};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait CheckRecordStore: Send + Sync {
    /// Inserting a second log for an already-logged check slot returns `Conflict`.
    fn insert(&self, record: CheckRecord) -> Result<CheckRecord, StoreError>;
    fn records_for(
        &self,
        organization: &OrganizationId,
        date: NaiveDate,
        shift: Shift,
    ) -> Result<Vec<CheckRecord>, StoreError>;
    fn history(
        &self,
        organization: &OrganizationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CheckRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a log already exists for this check slot")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Live reads of what the organization has switched on and which equipment it
/// operates. Completion is never cached against this data.
pub trait ComplianceConfigSource: Send + Sync {
    fn enabled_sections(
        &self,
        organization: &OrganizationId,
    ) -> Result<BTreeSet<ComplianceSection>, StoreError>;
    fn equipment(&self, organization: &OrganizationId)
        -> Result<Vec<EquipmentInstance>, StoreError>;
}
