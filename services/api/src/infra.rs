use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use complychef::compliance::assessment::{AssessmentRecord, AssessmentStore, AssessmentStoreError};
use complychef::compliance::identity::{OrgContext, OrganizationId, UserRef};
use complychef::compliance::monitoring::{
    CheckRecord, CheckRecordStore, ComplianceConfigSource, ComplianceSection, EquipmentClass,
    EquipmentInstance, EquipmentInstanceId, RecordIdentity, Shift, StoreError,
};
use complychef::compliance::onboarding::{
    HookError, OnboardingHooks, OnboardingProgress, OnboardingStore, ProgressStoreError,
};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCheckRecordStore {
    records: Arc<Mutex<HashMap<RecordIdentity, CheckRecord>>>,
}

impl CheckRecordStore for InMemoryCheckRecordStore {
    fn insert(&self, record: CheckRecord) -> Result<CheckRecord, StoreError> {
        let mut guard = self.records.lock().expect("check store mutex poisoned");
        if guard.contains_key(&record.identity()) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.identity(), record.clone());
        Ok(record)
    }

    fn records_for(
        &self,
        organization: &OrganizationId,
        date: NaiveDate,
        shift: Shift,
    ) -> Result<Vec<CheckRecord>, StoreError> {
        let guard = self.records.lock().expect("check store mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| {
                record.organization == *organization
                    && record.date == date
                    && record.shift == shift
            })
            .cloned()
            .collect())
    }

    fn history(
        &self,
        organization: &OrganizationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CheckRecord>, StoreError> {
        let guard = self.records.lock().expect("check store mutex poisoned");
        let mut records: Vec<CheckRecord> = guard
            .values()
            .filter(|record| {
                record.organization == *organization && record.date >= from && record.date <= to
            })
            .cloned()
            .collect();
        records.sort_by_key(|record| (record.date, record.logged_at));
        Ok(records)
    }
}

/// Section toggles and equipment for a single-site deployment. The demo set
/// covers every temperature-controlled class the standard catalog checks.
#[derive(Clone)]
pub(crate) struct InMemoryComplianceConfig {
    sections: BTreeSet<ComplianceSection>,
    equipment: Vec<EquipmentInstance>,
}

impl Default for InMemoryComplianceConfig {
    fn default() -> Self {
        Self {
            sections: ComplianceSection::ordered().into_iter().collect(),
            equipment: demo_equipment(),
        }
    }
}

impl ComplianceConfigSource for InMemoryComplianceConfig {
    fn enabled_sections(
        &self,
        _organization: &OrganizationId,
    ) -> Result<BTreeSet<ComplianceSection>, StoreError> {
        Ok(self.sections.clone())
    }

    fn equipment(
        &self,
        _organization: &OrganizationId,
    ) -> Result<Vec<EquipmentInstance>, StoreError> {
        Ok(self.equipment.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<HashMap<(OrganizationId, NaiveDate), AssessmentRecord>>>,
}

impl AssessmentStore for InMemoryAssessmentStore {
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
                record.organization == *organization && record.date >= from && record.date <= to
            })
            .cloned()
            .collect();
        records.sort_by_key(|record| record.date);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProgressStore {
    rows: Arc<Mutex<HashMap<(OrganizationId, String), OnboardingProgress>>>,
}

impl OnboardingStore for InMemoryProgressStore {
    fn load(
        &self,
        organization: &OrganizationId,
        user_id: &str,
    ) -> Result<Option<OnboardingProgress>, ProgressStoreError> {
        let guard = self.rows.lock().expect("progress mutex poisoned");
        Ok(guard
            .get(&(organization.clone(), user_id.to_string()))
            .cloned())
    }

    fn save(
        &self,
        organization: &OrganizationId,
        user_id: &str,
        progress: &OnboardingProgress,
    ) -> Result<(), ProgressStoreError> {
        let mut guard = self.rows.lock().expect("progress mutex poisoned");
        guard.insert(
            (organization.clone(), user_id.to_string()),
            progress.clone(),
        );
        Ok(())
    }
}

/// Onboarding side effects for a deployment without a templating backend:
/// the transitions are recorded in the log and nothing else happens.
pub(crate) struct LoggingOnboardingHooks;

impl OnboardingHooks for LoggingOnboardingHooks {
    fn seed_templates(&self, organization: &OrganizationId) -> Result<(), HookError> {
        info!(organization = %organization.0, "seeding diary templates");
        Ok(())
    }

    fn onboarding_completed(
        &self,
        organization: &OrganizationId,
        user: &UserRef,
    ) -> Result<(), HookError> {
        info!(organization = %organization.0, user = %user.display_name, "onboarding completed");
        Ok(())
    }
}

pub(crate) fn duty_manager() -> UserRef {
    UserRef {
        id: "duty-manager".to_string(),
        display_name: "Duty Manager".to_string(),
    }
}

pub(crate) fn demo_context() -> OrgContext {
    OrgContext::new("demo-kitchen", duty_manager())
}

pub(crate) fn demo_equipment() -> Vec<EquipmentInstance> {
    let mut equipment = Vec::new();
    for (suffix, shift) in [("am", Shift::Am), ("pm", Shift::Pm)] {
        for (id, name, class) in [
            ("fridge-walk-in", "Walk-in Fridge", EquipmentClass::Fridge),
            ("fridge-prep", "Prep Fridge", EquipmentClass::Fridge),
            ("freezer-chest", "Chest Freezer", EquipmentClass::Freezer),
            ("hot-hold-counter", "Counter Hot Hold", EquipmentClass::HotHold),
        ] {
            equipment.push(EquipmentInstance {
                id: EquipmentInstanceId(format!("{id}-{suffix}")),
                name: name.to_string(),
                class,
                shift,
                active: true,
                thresholds: None,
            });
        }
    }
    equipment
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_shift(raw: &str) -> Result<Shift, String> {
    Shift::parse(raw).ok_or_else(|| format!("failed to parse '{raw}' as a shift (am or pm)"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
