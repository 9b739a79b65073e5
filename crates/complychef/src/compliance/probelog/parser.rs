use super::normalizer::normalize_sensor;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One usable reading from a probe export. Rows the export software pads in
/// (blank sensors, unparseable timestamps or temperatures) are dropped during
/// parsing rather than failing the whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReading {
    pub normalized_sensor: String,
    pub recorded_at: NaiveDateTime,
    pub celsius: f64,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ProbeReading>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut readings = Vec::new();

    for record in csv_reader.deserialize::<ProbeRow>() {
        let row = record?;
        let normalized_sensor = normalize_sensor(&row.sensor);
        if normalized_sensor.is_empty() {
            continue;
        }

        let Some(recorded_at) = row.recorded_at.as_deref().and_then(parse_datetime) else {
            continue;
        };
        let Some(celsius) = row.celsius() else {
            continue;
        };

        readings.push(ProbeReading {
            normalized_sensor,
            recorded_at,
            celsius,
        });
    }

    Ok(readings)
}

#[derive(Debug, Deserialize)]
struct ProbeRow {
    #[serde(rename = "Sensor")]
    sensor: String,
    #[serde(
        rename = "Recorded At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    recorded_at: Option<String>,
    #[serde(
        rename = "Temperature C",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    temperature: Option<String>,
}

impl ProbeRow {
    fn celsius(&self) -> Option<f64> {
        self.temperature
            .as_deref()
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}
