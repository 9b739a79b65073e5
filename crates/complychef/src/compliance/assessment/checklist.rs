use serde::{Deserialize, Serialize};

use super::domain::Severity;

/// Grouping of checklist questions as they appear on the assessment screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    TemperatureControl,
    CrossContamination,
    FoodHandling,
    PersonalHygiene,
    Cleaning,
    PestControl,
    WasteManagement,
    Premises,
    Documentation,
    Allergens,
}

impl ItemCategory {
    pub const fn ordered() -> [ItemCategory; 10] {
        [
            ItemCategory::TemperatureControl,
            ItemCategory::CrossContamination,
            ItemCategory::FoodHandling,
            ItemCategory::PersonalHygiene,
            ItemCategory::Cleaning,
            ItemCategory::PestControl,
            ItemCategory::WasteManagement,
            ItemCategory::Premises,
            ItemCategory::Documentation,
            ItemCategory::Allergens,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ItemCategory::TemperatureControl => "temperature_control",
            ItemCategory::CrossContamination => "cross_contamination",
            ItemCategory::FoodHandling => "food_handling",
            ItemCategory::PersonalHygiene => "personal_hygiene",
            ItemCategory::Cleaning => "cleaning",
            ItemCategory::PestControl => "pest_control",
            ItemCategory::WasteManagement => "waste_management",
            ItemCategory::Premises => "premises",
            ItemCategory::Documentation => "documentation",
            ItemCategory::Allergens => "allergens",
        }
    }
}

/// One regulatory checklist question. `allowed_severities` constrains what a
/// non-compliant answer may be graded as; `evidence_required_high_risk`
/// marks items a high-risk business must evidence when found non-compliant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentItem {
    pub code: &'static str,
    pub category: ItemCategory,
    pub text: &'static str,
    pub allowed_severities: &'static [Severity],
    pub evidence_required_high_risk: bool,
}

impl AssessmentItem {
    pub fn allows(&self, severity: Severity) -> bool {
        self.allowed_severities.contains(&severity)
    }
}

const ANY: &[Severity] = &[Severity::Minor, Severity::Major, Severity::Critical];
const UP_TO_MAJOR: &[Severity] = &[Severity::Minor, Severity::Major];
const MAJOR_UP: &[Severity] = &[Severity::Major, Severity::Critical];

const fn item(
    code: &'static str,
    category: ItemCategory,
    text: &'static str,
    allowed_severities: &'static [Severity],
    evidence_required_high_risk: bool,
) -> AssessmentItem {
    AssessmentItem {
        code,
        category,
        text,
        allowed_severities,
        evidence_required_high_risk,
    }
}

/// The fixed question table the assessment screens render.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentChecklist {
    items: Vec<AssessmentItem>,
}

impl AssessmentChecklist {
    pub fn standard() -> Self {
        use ItemCategory::*;

        Self {
            items: vec![
                item(
                    "TC-01",
                    TemperatureControl,
                    "Chilled food is held at or below 5°C and readings are recorded each shift",
                    ANY,
                    false,
                ),
                item(
                    "TC-02",
                    TemperatureControl,
                    "Frozen food is held at or below -18°C",
                    ANY,
                    false,
                ),
                item(
                    "TC-03",
                    TemperatureControl,
                    "Hot-held food is kept at or above 63°C",
                    ANY,
                    true,
                ),
                item(
                    "TC-04",
                    TemperatureControl,
                    "Cooking reaches a verified core temperature before service",
                    ANY,
                    true,
                ),
                item(
                    "TC-05",
                    TemperatureControl,
                    "Cooked food is cooled and chilled within the permitted window",
                    ANY,
                    false,
                ),
                item(
                    "TC-06",
                    TemperatureControl,
                    "Temperature probes are calibrated and the calibration is logged",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "CC-01",
                    CrossContamination,
                    "Raw and ready-to-eat foods are stored and handled separately",
                    ANY,
                    true,
                ),
                item(
                    "CC-02",
                    CrossContamination,
                    "Separate boards and utensils are used for raw preparation",
                    ANY,
                    false,
                ),
                item(
                    "CC-03",
                    CrossContamination,
                    "Raw meat and fish are stored below ready-to-eat items",
                    ANY,
                    false,
                ),
                item(
                    "CC-04",
                    CrossContamination,
                    "Cloths are segregated between raw and ready-to-eat areas",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "FH-01",
                    FoodHandling,
                    "Defrosting is planned and carried out under refrigeration",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "FH-02",
                    FoodHandling,
                    "Prepared food carries day labels and is discarded at expiry",
                    ANY,
                    false,
                ),
                item(
                    "FH-03",
                    FoodHandling,
                    "Stock is rotated so the oldest date codes are used first",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "FH-04",
                    FoodHandling,
                    "No food is used or sold past its use-by date",
                    MAJOR_UP,
                    true,
                ),
                item(
                    "PH-01",
                    PersonalHygiene,
                    "Staff wash hands on entering the kitchen and between tasks",
                    ANY,
                    false,
                ),
                item(
                    "PH-02",
                    PersonalHygiene,
                    "Clean protective clothing is worn in preparation areas",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "PH-03",
                    PersonalHygiene,
                    "A fitness-to-work check excludes symptomatic staff from food handling",
                    MAJOR_UP,
                    true,
                ),
                item(
                    "PH-04",
                    PersonalHygiene,
                    "Cuts and wounds are covered with detectable dressings",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "CL-01",
                    Cleaning,
                    "The cleaning schedule is followed and signed off",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "CL-02",
                    Cleaning,
                    "Sanitiser is used at the stated dilution and contact time",
                    ANY,
                    false,
                ),
                item(
                    "CL-03",
                    Cleaning,
                    "Food contact equipment is cleaned between uses",
                    ANY,
                    false,
                ),
                item(
                    "CL-04",
                    Cleaning,
                    "Drains and hard-to-reach areas are on the deep-clean rota",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "PC-01",
                    PestControl,
                    "No evidence of pest activity in food rooms",
                    MAJOR_UP,
                    true,
                ),
                item(
                    "PC-02",
                    PestControl,
                    "Pest proofing of doors, windows and service entries is intact",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "PC-03",
                    PestControl,
                    "Pest control visits and findings are documented",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "WM-01",
                    WasteManagement,
                    "Internal bins are lidded, lined and emptied through the day",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "WM-02",
                    WasteManagement,
                    "External waste is stored in closed containers away from food entrances",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "WM-03",
                    WasteManagement,
                    "A licensed contractor removes waste and transfer notes are retained",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "PR-01",
                    Premises,
                    "Food contact surfaces are smooth, impervious and in good repair",
                    ANY,
                    false,
                ),
                item(
                    "PR-02",
                    Premises,
                    "Lighting and ventilation are adequate for safe working",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "PR-03",
                    Premises,
                    "Handwash basins are dedicated, stocked and accessible",
                    ANY,
                    false,
                ),
                item(
                    "PR-04",
                    Premises,
                    "Structural defects are reported and repairs tracked to completion",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "DC-01",
                    Documentation,
                    "Opening and closing checks are completed and retained daily",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "DC-02",
                    Documentation,
                    "Monitoring records are retained for the required period",
                    UP_TO_MAJOR,
                    false,
                ),
                item(
                    "DC-03",
                    Documentation,
                    "Staff food safety training is current and recorded",
                    ANY,
                    false,
                ),
                item(
                    "DC-04",
                    Documentation,
                    "The food safety management system is documented and in use",
                    ANY,
                    true,
                ),
                item(
                    "AL-01",
                    Allergens,
                    "The allergen matrix matches the current menu and recipes",
                    ANY,
                    true,
                ),
                item(
                    "AL-02",
                    Allergens,
                    "Allergen information is available to customers at the point of sale",
                    ANY,
                    false,
                ),
                item(
                    "AL-03",
                    Allergens,
                    "Allergen ingredients are stored and prepared to avoid carry-over",
                    ANY,
                    false,
                ),
                item(
                    "AL-04",
                    Allergens,
                    "Staff can explain the allergen procedure for special requests",
                    UP_TO_MAJOR,
                    false,
                ),
            ],
        }
    }

    pub fn item(&self, code: &str) -> Option<&AssessmentItem> {
        self.items.iter().find(|item| item.code == code)
    }

    pub fn items(&self) -> &[AssessmentItem] {
        &self.items
    }

    pub fn for_category(&self, category: ItemCategory) -> impl Iterator<Item = &AssessmentItem> {
        self.items.iter().filter(move |item| item.category == category)
    }
}
