use serde::{Deserialize, Serialize};

use super::domain::EquipmentClass;
use super::thresholds::ThresholdSpec;

/// Grouping of checks as they appear on the daily diary screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceSection {
    Temperatures,
    FoodHandling,
    Receiving,
    DailyRoutines,
    Cleaning,
    Maintenance,
}

impl ComplianceSection {
    pub const fn ordered() -> [ComplianceSection; 6] {
        [
            ComplianceSection::Temperatures,
            ComplianceSection::FoodHandling,
            ComplianceSection::Receiving,
            ComplianceSection::DailyRoutines,
            ComplianceSection::Cleaning,
            ComplianceSection::Maintenance,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComplianceSection::Temperatures => "temperatures",
            ComplianceSection::FoodHandling => "food_handling",
            ComplianceSection::Receiving => "receiving",
            ComplianceSection::DailyRoutines => "daily_routines",
            ComplianceSection::Cleaning => "cleaning",
            ComplianceSection::Maintenance => "maintenance",
        }
    }
}

/// How a check's status is derived from what the operator records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckSource {
    /// Temperature reading against a configured equipment instance of this class.
    Equipment(EquipmentClass),
    /// Temperature reading against fixed process bands (cooking, cooling, reheating).
    Process(ThresholdSpec),
    /// Delivery temperature classified by the goods category named on the log.
    Receiving,
    /// Yes/no confirmation with no thresholds involved.
    Procedural,
}

/// One entry in the check catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub section: ComplianceSection,
    pub source: CheckSource,
}

/// The full set of checks an organization can enable, keyed by stable string keys.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckCatalog {
    definitions: Vec<CheckDefinition>,
}

impl CheckCatalog {
    pub fn standard() -> Self {
        use CheckSource::*;
        use ComplianceSection::*;
        use EquipmentClass::*;

        Self {
            definitions: vec![
                CheckDefinition {
                    key: "fridge_temperature",
                    name: "Fridge temperature",
                    section: Temperatures,
                    source: Equipment(Fridge),
                },
                CheckDefinition {
                    key: "freezer_temperature",
                    name: "Freezer temperature",
                    section: Temperatures,
                    source: Equipment(Freezer),
                },
                CheckDefinition {
                    key: "hot_hold_temperature",
                    name: "Hot hold temperature",
                    section: Temperatures,
                    source: Equipment(HotHold),
                },
                CheckDefinition {
                    key: "cooking_temperature",
                    name: "Cooking core temperature",
                    section: FoodHandling,
                    source: Process(ThresholdSpec::new(75.0, f64::INFINITY, 70.0, 75.0)),
                },
                CheckDefinition {
                    key: "reheating_temperature",
                    name: "Reheating core temperature",
                    section: FoodHandling,
                    source: Process(ThresholdSpec::new(82.0, f64::INFINITY, 75.0, 82.0)),
                },
                CheckDefinition {
                    key: "cooling_temperature",
                    name: "Cooling end temperature",
                    section: FoodHandling,
                    source: Process(ThresholdSpec::new(f64::NEG_INFINITY, 21.0, 21.0, 32.0)),
                },
                CheckDefinition {
                    key: "allergen_board",
                    name: "Allergen board up to date",
                    section: FoodHandling,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "receiving_temperature",
                    name: "Goods received temperature",
                    section: ComplianceSection::Receiving,
                    source: CheckSource::Receiving,
                },
                CheckDefinition {
                    key: "opening_checks",
                    name: "Opening checks",
                    section: DailyRoutines,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "closing_checks",
                    name: "Closing checks",
                    section: DailyRoutines,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "fitness_to_work",
                    name: "Staff fitness to work",
                    section: DailyRoutines,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "handwash_stations",
                    name: "Handwash stations stocked",
                    section: Cleaning,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "cleaning_schedule",
                    name: "Cleaning schedule signed off",
                    section: Cleaning,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "sanitiser_check",
                    name: "Sanitiser concentration",
                    section: Cleaning,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "probe_calibration",
                    name: "Probe calibration",
                    section: Maintenance,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "pest_control",
                    name: "Pest control walkthrough",
                    section: Maintenance,
                    source: Procedural,
                },
                CheckDefinition {
                    key: "grease_trap",
                    name: "Grease trap inspection",
                    section: Maintenance,
                    source: Procedural,
                },
            ],
        }
    }

    pub fn definition(&self, key: &str) -> Option<&CheckDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.key == key)
    }

    /// The equipment-backed check a temperature reading for this class logs
    /// against, if the catalog carries one.
    pub fn equipment_check(&self, class: EquipmentClass) -> Option<&CheckDefinition> {
        self.definitions
            .iter()
            .find(|definition| matches!(definition.source, CheckSource::Equipment(c) if c == class))
    }

    pub fn definitions(&self) -> &[CheckDefinition] {
        &self.definitions
    }

    pub fn for_section(
        &self,
        section: ComplianceSection,
    ) -> impl Iterator<Item = &CheckDefinition> {
        self.definitions
            .iter()
            .filter(move |definition| definition.section == section)
    }
}
