use chrono::{NaiveDateTime, Timelike};

use super::normalizer::normalize_sensor;
use crate::compliance::monitoring::{EquipmentInstance, Shift};

/// Readings taken before this hour belong to the AM shift.
pub(crate) const PM_CUTOVER_HOUR: u32 = 14;

pub(crate) fn shift_for(recorded_at: NaiveDateTime) -> Shift {
    if recorded_at.hour() < PM_CUTOVER_HOUR {
        Shift::Am
    } else {
        Shift::Pm
    }
}

/// Match a normalized sensor label to the active equipment instance configured
/// for the reading's shift. Sensor labels are expected to carry the equipment
/// name as configured.
pub(crate) fn instance_for<'a>(
    normalized_sensor: &str,
    shift: Shift,
    equipment: &'a [EquipmentInstance],
) -> Option<&'a EquipmentInstance> {
    equipment.iter().find(|instance| {
        instance.active
            && instance.shift == shift
            && normalize_sensor(&instance.name) == normalized_sensor
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests<'a>(
    sensor: &str,
    shift: Shift,
    equipment: &'a [EquipmentInstance],
) -> Option<&'a EquipmentInstance> {
    let normalized = normalize_sensor(sensor);
    instance_for(&normalized, shift, equipment)
}
