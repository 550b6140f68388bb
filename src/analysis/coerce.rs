//! Numeric coercion for raw text fields.

/// Parse a raw field as a number, or zero.
///
/// Empty, absent, non-numeric and non-finite inputs (`NaN`, `inf`, `1e400`)
/// all yield `0.0`. Surrounding whitespace is ignored.
///
/// The whole field must be a number: `"12abc"` yields zero, not 12.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
