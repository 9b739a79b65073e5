/// Probe vendors export sensor labels with stray BOMs, zero-width characters,
/// and doubled spacing. Matching against configured equipment names happens on
/// this normalized form on both sides.
pub(crate) fn normalize_sensor(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_sensor(value)
}
