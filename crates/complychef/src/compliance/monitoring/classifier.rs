use super::domain::CheckStatus;
use super::thresholds::ThresholdSpec;

/// Classify a temperature reading against resolved bands. The pass band is
/// authoritative when the bands overlap. NaN readings fail.
pub fn classify(value: f64, spec: ThresholdSpec) -> CheckStatus {
    if value >= spec.pass_min && value <= spec.pass_max {
        CheckStatus::Pass
    } else if value >= spec.warn_min && value <= spec.warn_max {
        CheckStatus::Warning
    } else {
        CheckStatus::Fail
    }
}

/// Procedural confirmations have no warning band.
pub const fn classify_procedural(passed: bool) -> CheckStatus {
    if passed {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    }
}
