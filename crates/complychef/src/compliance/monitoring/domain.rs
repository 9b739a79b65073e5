use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::identity::{OrganizationId, UserRef};

use super::thresholds::ThresholdOverride;

/// Half of the working day a check is logged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Am,
    Pm,
}

impl Shift {
    pub const fn ordered() -> [Shift; 2] {
        [Shift::Am, Shift::Pm]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Shift::Am => "AM",
            Shift::Pm => "PM",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "am" => Some(Shift::Am),
            "pm" => Some(Shift::Pm),
            _ => None,
        }
    }
}

/// Outcome of classifying a single logged check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, CheckStatus::Pass)
    }
}

/// Temperature-controlled storage classes plus goods categories checked at delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentClass {
    Fridge,
    Freezer,
    HotHold,
    Dairy,
    Meat,
    Seafood,
    Poultry,
    Produce,
    Frozen,
    DryGoods,
    Bakery,
}

impl EquipmentClass {
    pub const fn ordered() -> [EquipmentClass; 11] {
        [
            EquipmentClass::Fridge,
            EquipmentClass::Freezer,
            EquipmentClass::HotHold,
            EquipmentClass::Dairy,
            EquipmentClass::Meat,
            EquipmentClass::Seafood,
            EquipmentClass::Poultry,
            EquipmentClass::Produce,
            EquipmentClass::Frozen,
            EquipmentClass::DryGoods,
            EquipmentClass::Bakery,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            EquipmentClass::Fridge => "fridge",
            EquipmentClass::Freezer => "freezer",
            EquipmentClass::HotHold => "hot_hold",
            EquipmentClass::Dairy => "dairy",
            EquipmentClass::Meat => "meat",
            EquipmentClass::Seafood => "seafood",
            EquipmentClass::Poultry => "poultry",
            EquipmentClass::Produce => "produce",
            EquipmentClass::Frozen => "frozen",
            EquipmentClass::DryGoods => "dry_goods",
            EquipmentClass::Bakery => "bakery",
        }
    }

    /// Goods categories accepted on a delivery check. Storage classes are not.
    pub const fn is_receiving_category(self) -> bool {
        !matches!(
            self,
            EquipmentClass::Fridge | EquipmentClass::Freezer | EquipmentClass::HotHold
        )
    }
}

/// Identifier wrapper for configured equipment instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentInstanceId(pub String);

/// A single configured unit (e.g. "Walk-in fridge"), bound to one class and one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentInstance {
    pub id: EquipmentInstanceId,
    pub name: String,
    pub class: EquipmentClass,
    pub shift: Shift,
    pub active: bool,
    pub thresholds: Option<ThresholdOverride>,
}

/// What was actually measured or confirmed when the check was performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    Temperature { celsius: f64 },
    Procedural { passed: bool },
}

/// Inbound payload for logging one check against a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSubmission {
    pub check_key: String,
    pub date: NaiveDate,
    pub shift: Shift,
    #[serde(default)]
    pub equipment_instance: Option<EquipmentInstanceId>,
    #[serde(default)]
    pub receiving_category: Option<EquipmentClass>,
    pub observation: Observation,
    #[serde(default)]
    pub corrective_note: Option<String>,
}

/// A stored, classified check log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub organization: OrganizationId,
    pub check_key: String,
    pub equipment_instance: Option<EquipmentInstanceId>,
    pub date: NaiveDate,
    pub shift: Shift,
    pub receiving_category: Option<EquipmentClass>,
    pub observation: Observation,
    pub status: CheckStatus,
    pub corrective_note: Option<String>,
    pub logged_by: UserRef,
    pub logged_at: DateTime<Utc>,
}

impl CheckRecord {
    /// The uniqueness key a store enforces: one log per check slot per shift.
    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity {
            organization: self.organization.clone(),
            check_key: self.check_key.clone(),
            equipment_instance: self.equipment_instance.clone(),
            date: self.date,
            shift: self.shift,
        }
    }

    pub fn view(&self) -> CheckLogView {
        CheckLogView {
            check_key: self.check_key.clone(),
            equipment_instance: self
                .equipment_instance
                .as_ref()
                .map(|instance| instance.0.clone()),
            date: self.date,
            shift: self.shift,
            shift_label: self.shift.label(),
            receiving_category: self.receiving_category.map(EquipmentClass::label),
            observation: self.observation,
            status: self.status,
            status_label: self.status.label(),
            corrective_note: self.corrective_note.clone(),
            logged_by: self.logged_by.display_name.clone(),
            logged_at: self.logged_at,
        }
    }
}

/// Hashable identity of one check slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordIdentity {
    pub organization: OrganizationId,
    pub check_key: String,
    pub equipment_instance: Option<EquipmentInstanceId>,
    pub date: NaiveDate,
    pub shift: Shift,
}

/// Serialized projection of a stored check log for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckLogView {
    pub check_key: String,
    pub equipment_instance: Option<String>,
    pub date: NaiveDate,
    pub shift: Shift,
    pub shift_label: &'static str,
    pub receiving_category: Option<&'static str>,
    pub observation: Observation,
    pub status: CheckStatus,
    pub status_label: &'static str,
    pub corrective_note: Option<String>,
    pub logged_by: String,
    pub logged_at: DateTime<Utc>,
}
