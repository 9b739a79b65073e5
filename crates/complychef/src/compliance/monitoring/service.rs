use std::io::Read;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::compliance::identity::OrgContext;
use crate::compliance::probelog::{self, ProbeLogImportError, ProbeLogImporter};

use super::catalog::{CheckCatalog, CheckSource};
use super::classifier::{classify, classify_procedural};
use super::completion::{ShiftCompletionReport, ShiftReconciler};
use super::domain::{
    CheckRecord, CheckSubmission, EquipmentClass, EquipmentInstance, Observation, Shift,
};
use super::gate::{CorrectiveActionGate, CorrectiveActionPolicy, LogValidationError};
use super::repository::{CheckRecordStore, ComplianceConfigSource, StoreError};
use super::thresholds::{resolve_threshold, ThresholdSpec, ThresholdTable};

/// Service composing the check catalog, classifier, corrective action gate,
/// and the backing stores.
pub struct ShiftMonitoringService<R, C> {
    records: Arc<R>,
    config: Arc<C>,
    catalog: CheckCatalog,
    thresholds: ThresholdTable,
    gate: CorrectiveActionGate,
}

impl<R, C> ShiftMonitoringService<R, C>
where
    R: CheckRecordStore + 'static,
    C: ComplianceConfigSource + 'static,
{
    pub fn new(records: Arc<R>, config: Arc<C>) -> Self {
        Self::with_policy(records, config, CorrectiveActionPolicy::default())
    }

    pub fn with_policy(records: Arc<R>, config: Arc<C>, policy: CorrectiveActionPolicy) -> Self {
        Self {
            records,
            config,
            catalog: CheckCatalog::standard(),
            thresholds: ThresholdTable::standard(),
            gate: CorrectiveActionGate::with_policy(policy),
        }
    }

    pub fn catalog(&self) -> &CheckCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Classify and persist one check log. The store enforces the one-log-per-
    /// slot rule, so validation and insert cannot race past each other.
    pub fn log_check(
        &self,
        context: &OrgContext,
        submission: CheckSubmission,
        now: DateTime<Utc>,
    ) -> Result<CheckRecord, MonitoringServiceError> {
        let definition = self.catalog.definition(&submission.check_key).ok_or_else(|| {
            LogValidationError::UnknownCheck {
                key: submission.check_key.clone(),
            }
        })?;

        let mut equipment_instance = None;
        let mut receiving_category = None;

        let status = match definition.source {
            CheckSource::Equipment(class) => {
                let instance_id = submission.equipment_instance.clone().ok_or_else(|| {
                    LogValidationError::MissingEquipmentInstance {
                        key: submission.check_key.clone(),
                    }
                })?;
                let celsius = self.temperature_of(&submission)?;

                let equipment = self.config.equipment(&context.organization)?;
                let instance = equipment
                    .iter()
                    .find(|instance| instance.id == instance_id)
                    .ok_or_else(|| LogValidationError::UnknownEquipmentInstance {
                        id: instance_id.0.clone(),
                    })?;

                if !instance.active {
                    return Err(LogValidationError::InactiveEquipmentInstance {
                        id: instance_id.0.clone(),
                    }
                    .into());
                }
                if instance.shift != submission.shift {
                    return Err(LogValidationError::WrongShiftEquipmentInstance {
                        id: instance_id.0.clone(),
                    }
                    .into());
                }
                if instance.class != class {
                    return Err(LogValidationError::EquipmentClassMismatch {
                        key: submission.check_key.clone(),
                        id: instance_id.0.clone(),
                        expected: class.label(),
                        found: instance.class.label(),
                    }
                    .into());
                }

                let spec = self.resolve_for(instance)?;
                equipment_instance = Some(instance_id);
                classify(celsius, spec)
            }
            CheckSource::Process(spec) => {
                let celsius = self.temperature_of(&submission)?;
                classify(celsius, spec)
            }
            CheckSource::Receiving => {
                let celsius = self.temperature_of(&submission)?;
                let category = submission
                    .receiving_category
                    .ok_or(LogValidationError::MissingReceivingCategory)?;
                if !category.is_receiving_category() {
                    return Err(LogValidationError::NotAReceivingCategory {
                        label: category.label(),
                    }
                    .into());
                }

                let spec = self.thresholds.spec_for(category).ok_or(
                    MonitoringServiceError::MissingClassThreshold { class: category },
                )?;
                receiving_category = Some(category);
                classify(celsius, spec)
            }
            CheckSource::Procedural => match submission.observation {
                Observation::Procedural { passed } => classify_procedural(passed),
                Observation::Temperature { .. } => {
                    return Err(LogValidationError::ExpectedProcedural {
                        key: submission.check_key.clone(),
                    }
                    .into())
                }
            },
        };

        self.gate
            .validate(status, submission.corrective_note.as_deref())?;

        let corrective_note = submission
            .corrective_note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string);

        let record = CheckRecord {
            organization: context.organization.clone(),
            check_key: submission.check_key,
            equipment_instance,
            date: submission.date,
            shift: submission.shift,
            receiving_category,
            observation: submission.observation,
            status,
            corrective_note,
            logged_by: context.user.clone(),
            logged_at: now,
        };

        let stored = self.records.insert(record)?;
        Ok(stored)
    }

    /// Recompute the completion picture for one shift from fresh reads of the
    /// record store and the organization's configuration.
    pub fn shift_status(
        &self,
        context: &OrgContext,
        date: NaiveDate,
        shift: Shift,
    ) -> Result<ShiftCompletionReport, MonitoringServiceError> {
        let enabled = self.config.enabled_sections(&context.organization)?;
        let equipment = self.config.equipment(&context.organization)?;
        let records = self
            .records
            .records_for(&context.organization, date, shift)?;

        let reconciler = ShiftReconciler::new(&self.catalog);
        Ok(reconciler.reconcile(&enabled, &equipment, &records, date, shift))
    }

    /// Raw logs over a date range for history views.
    pub fn history(
        &self,
        context: &OrgContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CheckRecord>, MonitoringServiceError> {
        let records = self.records.history(&context.organization, from, to)?;
        Ok(records)
    }

    /// Ingest a probe log export and file each reading as an equipment check.
    ///
    /// Failing readings cannot be stored directly because the export carries
    /// no corrective action notes; they are returned for manual follow-up
    /// instead. Already-logged slots are counted, not treated as errors.
    pub fn import_probe_log<Rd: Read>(
        &self,
        context: &OrgContext,
        reader: Rd,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<ProbeImportOutcome, MonitoringServiceError> {
        let readings = ProbeLogImporter::from_reader(reader)?;
        let equipment = self.config.equipment(&context.organization)?;
        let batch = probelog::batch_for_date(&readings, date, &equipment, &self.catalog);

        let mut outcome = ProbeImportOutcome {
            accepted: 0,
            duplicates: 0,
            unmatched_sensors: batch.unmatched_sensors,
            needs_attention: Vec::new(),
        };

        for submission in batch.submissions {
            let check_key = submission.check_key.clone();
            let instance = submission
                .equipment_instance
                .as_ref()
                .map(|id| id.0.clone())
                .unwrap_or_default();
            let celsius = match submission.observation {
                Observation::Temperature { celsius } => celsius,
                Observation::Procedural { .. } => 0.0,
            };

            match self.log_check(context, submission, now) {
                Ok(_) => outcome.accepted += 1,
                Err(MonitoringServiceError::Store(StoreError::Conflict)) => {
                    outcome.duplicates += 1;
                }
                Err(MonitoringServiceError::Validation(
                    LogValidationError::MissingCorrectiveNote { status },
                )) => {
                    outcome.needs_attention.push(ProbeImportIssue {
                        check_key,
                        equipment_instance: instance,
                        celsius,
                        status_label: status.label(),
                    });
                }
                Err(other) => return Err(other),
            }
        }

        Ok(outcome)
    }

    fn temperature_of(&self, submission: &CheckSubmission) -> Result<f64, LogValidationError> {
        match submission.observation {
            Observation::Temperature { celsius } => Ok(celsius),
            Observation::Procedural { .. } => Err(LogValidationError::ExpectedTemperature {
                key: submission.check_key.clone(),
            }),
        }
    }

    fn resolve_for(
        &self,
        instance: &EquipmentInstance,
    ) -> Result<ThresholdSpec, MonitoringServiceError> {
        resolve_threshold(instance, &self.thresholds).ok_or(
            MonitoringServiceError::MissingClassThreshold {
                class: instance.class,
            },
        )
    }
}

/// Result of one probe log import pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeImportOutcome {
    pub accepted: usize,
    pub duplicates: usize,
    pub unmatched_sensors: Vec<String>,
    pub needs_attention: Vec<ProbeImportIssue>,
}

/// A reading the import refused to store automatically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeImportIssue {
    pub check_key: String,
    pub equipment_instance: String,
    pub celsius: f64,
    pub status_label: &'static str,
}

/// Error raised by the monitoring service.
#[derive(Debug, thiserror::Error)]
pub enum MonitoringServiceError {
    #[error(transparent)]
    Validation(#[from] LogValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ProbeLogImportError),
    #[error("no threshold defaults registered for class '{}'", .class.label())]
    MissingClassThreshold { class: EquipmentClass },
}
