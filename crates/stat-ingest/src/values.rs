//! Polars value helpers.
//!
//! Numeric extraction never parses strings: a column's declared type decides
//! whether it is numeric.

use polars::prelude::{AnyValue, DataType};

/// True for integer and floating-point column types.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// True for null cells and float NaN.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Numeric cell value; `None` for null, NaN and non-numeric values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Int8(v) => f64::from(v),
        AnyValue::Int16(v) => f64::from(v),
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt8(v) => f64::from(v),
        AnyValue::UInt16(v) => f64::from(v),
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        _ => return None,
    };
    (!number.is_nan()).then_some(number)
}

/// Category label of a cell; `None` for null.
///
/// Booleans render as `True`/`False`, numbers without trailing zeros.
pub fn any_to_category(value: AnyValue<'_>) -> Option<String> {
    let label = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "True" } else { "False" }.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => {
            let s = other.to_string();
            match s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
                Some(inner) => inner.to_string(),
                None => s,
            }
        }
    };
    Some(label)
}

/// Formats a float without trailing zeros (`40.0` → `40`, `1.50` → `1.5`).
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(&AnyValue::Null));
        assert!(is_missing(&AnyValue::Float64(f64::NAN)));
        assert!(is_missing(&AnyValue::Float32(f32::NAN)));
        assert!(!is_missing(&AnyValue::Float64(0.0)));
        assert!(!is_missing(&AnyValue::String("NA")));
    }

    #[test]
    fn test_any_to_f64_skips_nan_and_strings() {
        assert_eq!(any_to_f64(AnyValue::Int32(4)), Some(4.0));
        assert_eq!(any_to_f64(AnyValue::Float64(2.5)), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(AnyValue::String("3")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn test_any_to_category() {
        assert_eq!(any_to_category(AnyValue::String("F")), Some("F".to_string()));
        assert_eq!(
            any_to_category(AnyValue::Boolean(true)),
            Some("True".to_string())
        );
        assert_eq!(any_to_category(AnyValue::Int64(7)), Some("7".to_string()));
        assert_eq!(any_to_category(AnyValue::Null), None);
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(40.0), "40");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(-0.0), "-0");
        assert_eq!(format_numeric(0.25), "0.25");
    }
}
