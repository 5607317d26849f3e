//! Numeric coercion of raw series cells

/// Parse a raw cell as a finite number
///
/// Blank cells, text, and non-finite values are all treated as missing.
/// A single decimal comma (`"12,5"`) is accepted because the source publishes
/// values in that locale.
pub fn coerce_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = match trimmed.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) if trimmed.matches(',').count() == 1 && !trimmed.contains('.') => {
            trimmed.replace(',', ".").parse::<f64>().ok()
        }
        Err(_) => None,
    };

    parsed.filter(|v| v.is_finite())
}
