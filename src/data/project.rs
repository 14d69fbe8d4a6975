use super::model::{FeatureVector, FieldValue, Row, ID_FIELD, LABEL_FIELD};

// ---------------------------------------------------------------------------
// Numeric conversion
// ---------------------------------------------------------------------------

/// Convert a raw cell to `f64`. Anything that is not a number becomes NaN.
pub fn to_number(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Number(v) => *v,
        FieldValue::Text(s) => parse_float(s),
        FieldValue::Missing => f64::NAN,
    }
}

/// Lenient float parsing: skip leading whitespace, then take the longest
/// prefix that forms a number (`"12.5mV"` → 12.5). No numeric prefix → NaN.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Ordered feature vector of a row.
pub fn project(row: &Row) -> FeatureVector {
    project_fields(row.features.iter().map(|f| (f.name.as_str(), &f.value)))
}

/// Project an untyped, ordered `name → value` sequence: every field except
/// the identifier and label, in the order given.
pub fn project_fields<'a, I>(fields: I) -> FeatureVector
where
    I: IntoIterator<Item = (&'a str, &'a FieldValue)>,
{
    fields
        .into_iter()
        .filter(|(name, _)| *name != ID_FIELD && *name != LABEL_FIELD)
        .map(|(_, value)| to_number(value))
        .collect::<Vec<_>>()
        .into()
}
