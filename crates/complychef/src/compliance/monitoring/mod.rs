//! Daily shift monitoring: check logging, temperature classification, and
//! shift completion reconciliation against the configured check catalog.

pub mod catalog;
pub mod classifier;
pub mod completion;
pub mod domain;
pub(crate) mod gate;
pub mod repository;
pub mod router;
pub mod service;
pub mod thresholds;

#[cfg(test)]
mod tests;

pub use catalog::{CheckCatalog, CheckDefinition, CheckSource, ComplianceSection};
pub use domain::{
    CheckLogView, CheckRecord, CheckStatus, CheckSubmission, EquipmentClass, EquipmentInstance,
    EquipmentInstanceId, Observation, RecordIdentity, Shift,
};
pub use gate::{CorrectiveActionGate, CorrectiveActionPolicy, LogValidationError};
pub use repository::{CheckRecordStore, ComplianceConfigSource, StoreError};
pub use router::monitoring_router;
pub use service::{
    MonitoringServiceError, ProbeImportIssue, ProbeImportOutcome, ShiftMonitoringService,
};
pub use thresholds::{resolve_threshold, ThresholdOverride, ThresholdSpec, ThresholdTable};
