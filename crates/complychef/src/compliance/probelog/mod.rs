//! Ingestion of temperature probe CSV exports into equipment check submissions.

mod mapping;
mod normalizer;
mod parser;

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::compliance::monitoring::{
    CheckCatalog, CheckSubmission, EquipmentInstance, EquipmentInstanceId, Observation, Shift,
};

pub use parser::ProbeReading;

#[derive(Debug)]
pub enum ProbeLogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ProbeLogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeLogImportError::Io(err) => write!(f, "failed to read probe export: {}", err),
            ProbeLogImportError::Csv(err) => write!(f, "invalid probe CSV data: {}", err),
        }
    }
}

impl std::error::Error for ProbeLogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeLogImportError::Io(err) => Some(err),
            ProbeLogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProbeLogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProbeLogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ProbeLogImporter;

impl ProbeLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProbeReading>, ProbeLogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProbeReading>, ProbeLogImportError> {
        let readings = parser::parse_records(reader)?;
        Ok(readings)
    }
}

/// What one import pass wants to file, plus the sensors nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeLogBatch {
    pub submissions: Vec<CheckSubmission>,
    pub unmatched_sensors: Vec<String>,
}

/// Turn a day's readings into check submissions against configured equipment.
///
/// Readings are bucketed into AM/PM by wall-clock time and matched to the
/// instance configured for that shift by sensor label. The earliest reading
/// per instance and shift becomes the submission; later readings for the same
/// slot are dropped, since the slot can hold only one log anyway.
pub fn batch_for_date(
    readings: &[ProbeReading],
    date: NaiveDate,
    equipment: &[EquipmentInstance],
    catalog: &CheckCatalog,
) -> ProbeLogBatch {
    let mut ordered: Vec<&ProbeReading> = readings
        .iter()
        .filter(|reading| reading.recorded_at.date() == date)
        .collect();
    ordered.sort_by_key(|reading| reading.recorded_at);

    let mut taken: HashSet<(EquipmentInstanceId, Shift)> = HashSet::new();
    let mut unmatched: BTreeSet<String> = BTreeSet::new();
    let mut submissions = Vec::new();

    for reading in ordered {
        let shift = mapping::shift_for(reading.recorded_at);
        let Some(instance) = mapping::instance_for(&reading.normalized_sensor, shift, equipment)
        else {
            unmatched.insert(reading.normalized_sensor.clone());
            continue;
        };
        let Some(definition) = catalog.equipment_check(instance.class) else {
            unmatched.insert(reading.normalized_sensor.clone());
            continue;
        };

        if !taken.insert((instance.id.clone(), shift)) {
            continue;
        }

        submissions.push(CheckSubmission {
            check_key: definition.key.to_string(),
            date,
            shift,
            equipment_instance: Some(instance.id.clone()),
            receiving_category: None,
            observation: Observation::Temperature {
                celsius: reading.celsius,
            },
            corrective_note: None,
        });
    }

    ProbeLogBatch {
        submissions,
        unmatched_sensors: unmatched.into_iter().collect(),
    }
}
