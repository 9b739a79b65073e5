use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::compliance::identity::{OrgContext, UserRef};
use crate::compliance::monitoring::domain::{
    CheckRecord, CheckStatus, CheckSubmission, EquipmentClass, EquipmentInstance,
    EquipmentInstanceId, Observation, RecordIdentity, Shift,
};
use crate::compliance::monitoring::repository::{
    CheckRecordStore, ComplianceConfigSource, StoreError,
};
use crate::compliance::monitoring::router::monitoring_router;
use crate::compliance::monitoring::service::ShiftMonitoringService;
use crate::compliance::monitoring::ComplianceSection;

pub(super) fn context() -> OrgContext {
    OrgContext::new(
        "harbour-bistro",
        UserRef {
            id: "user-7".to_string(),
            display_name: "Dana Reyes".to_string(),
        },
    )
}

pub(super) fn shift_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date")
}

pub(super) fn logged_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 9, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn instance(
    id: &str,
    name: &str,
    class: EquipmentClass,
    shift: Shift,
) -> EquipmentInstance {
    EquipmentInstance {
        id: EquipmentInstanceId(id.to_string()),
        name: name.to_string(),
        class,
        shift,
        active: true,
        thresholds: None,
    }
}

pub(super) fn default_equipment() -> Vec<EquipmentInstance> {
    vec![
        instance("fridge-walkin-am", "Walk-in Fridge", EquipmentClass::Fridge, Shift::Am),
        instance("fridge-prep-am", "Prep Fridge", EquipmentClass::Fridge, Shift::Am),
        instance("freezer-main-am", "Chest Freezer", EquipmentClass::Freezer, Shift::Am),
        instance("hothold-counter-am", "Hot Counter", EquipmentClass::HotHold, Shift::Am),
    ]
}

pub(super) fn all_sections() -> BTreeSet<ComplianceSection> {
    ComplianceSection::ordered().into_iter().collect()
}

pub(super) fn temperature_submission(
    check_key: &str,
    instance_id: Option<&str>,
    celsius: f64,
) -> CheckSubmission {
    CheckSubmission {
        check_key: check_key.to_string(),
        date: shift_date(),
        shift: Shift::Am,
        equipment_instance: instance_id.map(|id| EquipmentInstanceId(id.to_string())),
        receiving_category: None,
        observation: Observation::Temperature { celsius },
        corrective_note: None,
    }
}

pub(super) fn procedural_submission(check_key: &str, passed: bool) -> CheckSubmission {
    CheckSubmission {
        check_key: check_key.to_string(),
        date: shift_date(),
        shift: Shift::Am,
        equipment_instance: None,
        receiving_category: None,
        observation: Observation::Procedural { passed },
        corrective_note: None,
    }
}

pub(super) fn stored_record(
    check_key: &str,
    instance_id: Option<&str>,
    status: CheckStatus,
) -> CheckRecord {
    let context = context();
    CheckRecord {
        organization: context.organization,
        check_key: check_key.to_string(),
        equipment_instance: instance_id.map(|id| EquipmentInstanceId(id.to_string())),
        date: shift_date(),
        shift: Shift::Am,
        receiving_category: None,
        observation: Observation::Temperature { celsius: 4.0 },
        status,
        corrective_note: None,
        logged_by: context.user,
        logged_at: logged_at(),
    }
}

pub(super) fn build_service() -> (
    ShiftMonitoringService<MemoryRecordStore, MemoryConfigSource>,
    Arc<MemoryRecordStore>,
    Arc<MemoryConfigSource>,
) {
    let records = Arc::new(MemoryRecordStore::default());
    let config = Arc::new(MemoryConfigSource::default());
    let service = ShiftMonitoringService::new(records.clone(), config.clone());
    (service, records, config)
}

#[derive(Clone)]
pub(super) struct MemoryRecordStore {
    pub(super) records: Arc<Mutex<HashMap<RecordIdentity, CheckRecord>>>,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl CheckRecordStore for MemoryRecordStore {
    fn insert(&self, record: CheckRecord) -> Result<CheckRecord, StoreError> {
        let mut guard = self.records.lock().expect("record mutex poisoned");
        let identity = record.identity();
        if guard.contains_key(&identity) {
            return Err(StoreError::Conflict);
        }
        guard.insert(identity, record.clone());
        Ok(record)
    }

    fn records_for(
        &self,
        organization: &crate::compliance::identity::OrganizationId,
        date: NaiveDate,
        shift: Shift,
    ) -> Result<Vec<CheckRecord>, StoreError> {
        let guard = self.records.lock().expect("record mutex poisoned");
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
        organization: &crate::compliance::identity::OrganizationId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CheckRecord>, StoreError> {
        let guard = self.records.lock().expect("record mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| {
                record.organization == *organization && record.date >= from && record.date <= to
            })
            .cloned()
            .collect())
    }
}

#[derive(Clone)]
pub(super) struct MemoryConfigSource {
    sections: Arc<Mutex<BTreeSet<ComplianceSection>>>,
    equipment: Arc<Mutex<Vec<EquipmentInstance>>>,
}

impl Default for MemoryConfigSource {
    fn default() -> Self {
        Self {
            sections: Arc::new(Mutex::new(all_sections())),
            equipment: Arc::new(Mutex::new(default_equipment())),
        }
    }
}

impl MemoryConfigSource {
    pub(super) fn set_sections(&self, sections: BTreeSet<ComplianceSection>) {
        *self.sections.lock().expect("section mutex poisoned") = sections;
    }

    pub(super) fn set_equipment(&self, equipment: Vec<EquipmentInstance>) {
        *self.equipment.lock().expect("equipment mutex poisoned") = equipment;
    }
}

impl ComplianceConfigSource for MemoryConfigSource {
    fn enabled_sections(
        &self,
        _organization: &crate::compliance::identity::OrganizationId,
    ) -> Result<BTreeSet<ComplianceSection>, StoreError> {
        Ok(self.sections.lock().expect("section mutex poisoned").clone())
    }

    fn equipment(
        &self,
        _organization: &crate::compliance::identity::OrganizationId,
    ) -> Result<Vec<EquipmentInstance>, StoreError> {
        Ok(self
            .equipment
            .lock()
            .expect("equipment mutex poisoned")
            .clone())
    }
}

pub(super) struct UnavailableStore;

impl CheckRecordStore for UnavailableStore {
    fn insert(&self, _record: CheckRecord) -> Result<CheckRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn records_for(
        &self,
        _organization: &crate::compliance::identity::OrganizationId,
        _date: NaiveDate,
        _shift: Shift,
    ) -> Result<Vec<CheckRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn history(
        &self,
        _organization: &crate::compliance::identity::OrganizationId,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<CheckRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn monitoring_router_with_service(
    service: ShiftMonitoringService<MemoryRecordStore, MemoryConfigSource>,
) -> axum::Router {
    monitoring_router(Arc::new(service), context())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
