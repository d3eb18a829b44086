/// Rendered in place of a measurement the user did not provide.
pub const UNMEASURED: &str = "unmeasured";

/// Parse a free-text measurement. Blank, unparsable, or non-finite input is
/// `None`, never zero. A decimal comma is accepted.
pub fn parse_measure(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// `"6 mm"`, `"6.5 mm"`, or [`UNMEASURED`].
pub fn format_mm(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v} mm"),
        None => UNMEASURED.to_string(),
    }
}
