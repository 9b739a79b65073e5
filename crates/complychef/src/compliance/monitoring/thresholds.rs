use serde::{Deserialize, Serialize};

use super::domain::{EquipmentClass, EquipmentInstance};

/// Fully resolved temperature acceptance bands in degrees Celsius.
///
/// The pass band is checked first, then the warning band; anything outside
/// both fails. Open-ended bands use the infinities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    pub pass_min: f64,
    pub pass_max: f64,
    pub warn_min: f64,
    pub warn_max: f64,
}

impl ThresholdSpec {
    pub const fn new(pass_min: f64, pass_max: f64, warn_min: f64, warn_max: f64) -> Self {
        Self {
            pass_min,
            pass_max,
            warn_min,
            warn_max,
        }
    }
}

/// Per-instance override of the class defaults. A missing warning bound
/// collapses to the adjacent pass bound, leaving no warning band on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverride {
    pub pass_min: f64,
    pub pass_max: f64,
    #[serde(default)]
    pub warn_min: Option<f64>,
    #[serde(default)]
    pub warn_max: Option<f64>,
}

impl ThresholdOverride {
    pub fn resolve(&self) -> ThresholdSpec {
        ThresholdSpec {
            pass_min: self.pass_min,
            pass_max: self.pass_max,
            warn_min: self.warn_min.unwrap_or(self.pass_min),
            warn_max: self.warn_max.unwrap_or(self.pass_max),
        }
    }
}

/// Class-level default bands an organization starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    entries: Vec<(EquipmentClass, ThresholdSpec)>,
}

impl ThresholdTable {
    /// Defaults aligned with UK FSA guidance for chilled, frozen, and hot-held
    /// food plus goods-in acceptance temperatures.
    pub fn standard() -> Self {
        use EquipmentClass::*;

        Self {
            entries: vec![
                (Fridge, ThresholdSpec::new(0.0, 5.0, -2.0, 8.0)),
                (
                    Freezer,
                    ThresholdSpec::new(f64::NEG_INFINITY, -18.0, f64::NEG_INFINITY, -15.0),
                ),
                (
                    HotHold,
                    ThresholdSpec::new(63.0, f64::INFINITY, 54.0, f64::INFINITY),
                ),
                (Dairy, ThresholdSpec::new(0.0, 5.0, 0.0, 8.0)),
                (Meat, ThresholdSpec::new(0.0, 5.0, 0.0, 7.0)),
                (Seafood, ThresholdSpec::new(0.0, 2.0, 0.0, 5.0)),
                (Poultry, ThresholdSpec::new(0.0, 4.0, 0.0, 7.0)),
                (Produce, ThresholdSpec::new(0.0, 10.0, 0.0, 15.0)),
                (
                    Frozen,
                    ThresholdSpec::new(f64::NEG_INFINITY, -18.0, f64::NEG_INFINITY, -12.0),
                ),
                (DryGoods, ThresholdSpec::new(0.0, 25.0, -5.0, 30.0)),
                (Bakery, ThresholdSpec::new(0.0, 25.0, -5.0, 30.0)),
            ],
        }
    }

    pub fn spec_for(&self, class: EquipmentClass) -> Option<ThresholdSpec> {
        self.entries
            .iter()
            .find(|(entry_class, _)| *entry_class == class)
            .map(|(_, spec)| *spec)
    }
}

/// Instance override wins over the class default when present.
pub fn resolve_threshold(
    instance: &EquipmentInstance,
    table: &ThresholdTable,
) -> Option<ThresholdSpec> {
    match &instance.thresholds {
        Some(bounds) => Some(bounds.resolve()),
        None => table.spec_for(instance.class),
    }
}
