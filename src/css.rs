//! Formatting numbers for inline CSS values.

/// Render a number for CSS, rounded to four decimals with no trailing zeros.
///
/// Floating point products like `3.0 * 0.1` would otherwise leak into the
/// style attribute as `0.30000000000000004`.
pub fn number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{rounded}")
}

/// Render a duration in seconds, e.g. `0.3s`.
pub fn seconds(value: f64) -> String {
    format!("{}s", number(value))
}

/// Render a pixel length, e.g. `12.5px`.
pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}
