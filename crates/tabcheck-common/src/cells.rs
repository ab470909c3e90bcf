//! Reading single table cells as text or numbers.

use std::borrow::Cow;

use polars::prelude::{AnyValue, Column};

/// The text a cell holds, as a null token would be compared against it.
///
/// String cells are borrowed as-is, without trimming. Floats drop trailing zeros so that
/// `-999.0` reads as `-999`, and the native missing value reads as an empty string.
pub fn cell_text<'a>(value: &'a AnyValue<'_>) -> Cow<'a, str> {
    match value {
        AnyValue::Null => Cow::Borrowed(""),
        AnyValue::String(s) => Cow::Borrowed(s),
        AnyValue::StringOwned(s) => Cow::Borrowed(s.as_str()),
        AnyValue::Float32(v) => Cow::Owned(format_number(f64::from(*v))),
        AnyValue::Float64(v) => Cow::Owned(format_number(*v)),
        other => Cow::Owned(other.to_string()),
    }
}

/// The value at `idx`, or the native missing value when the index is out of range.
pub fn cell_at(column: &Column, idx: usize) -> AnyValue<'_> {
    column.get(idx).unwrap_or(AnyValue::Null)
}

/// A cell read as a number.
///
/// Integer and float cells convert directly; string cells are parsed after trimming
/// surrounding whitespace. Anything else, including empty text, is not a number.
pub fn cell_number(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => parse_number(s),
        AnyValue::StringOwned(s) => parse_number(s),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    match text.trim() {
        "" => None,
        trimmed => trimmed.parse().ok(),
    }
}

/// Shortest decimal form of `v`: `1` rather than `1.0`, `0.5` rather than `0.50`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        // Also folds -0.0.
        return "0".to_string();
    }
    // `Display` for f64 already prints the shortest round-tripping form.
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn text_of_common_cells() {
        assert_eq!(cell_text(&AnyValue::Null), "");
        assert_eq!(cell_text(&AnyValue::Int64(-100)), "-100");
        assert_eq!(cell_text(&AnyValue::Float64(-999.0)), "-999");
        assert_eq!(cell_text(&AnyValue::Float64(2.50)), "2.5");
        assert_eq!(cell_text(&AnyValue::Boolean(true)), "true");
    }

    #[test]
    fn text_is_not_trimmed() {
        assert_eq!(cell_text(&AnyValue::String(" NA")), " NA");
        assert!(matches!(cell_text(&AnyValue::String("x")), Cow::Borrowed("x")));
    }

    #[test]
    fn numbers_from_cells() {
        assert_eq!(cell_number(&AnyValue::Null), None);
        assert_eq!(cell_number(&AnyValue::UInt8(7)), Some(7.0));
        assert_eq!(cell_number(&AnyValue::String("  3.5 ")), Some(3.5));
        assert_eq!(cell_number(&AnyValue::String("1e3")), Some(1000.0));
        assert_eq!(cell_number(&AnyValue::String(" ")), None);
        assert_eq!(cell_number(&AnyValue::String("abc")), None);
        assert_eq!(cell_number(&AnyValue::Boolean(true)), None);
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn out_of_range_index_reads_as_missing() {
        let column = Column::new("A".into(), &[1i64]);
        assert_eq!(cell_at(&column, 5), AnyValue::Null);
    }

    proptest! {
        #[test]
        fn formatted_numbers_parse_back(v in -1.0e12f64..1.0e12) {
            let text = format_number(v);
            prop_assert_eq!(cell_number(&AnyValue::String(&text)), Some(if v == 0.0 { 0.0 } else { v }));
        }

        #[test]
        fn integer_cells_match_their_text(v in any::<i32>()) {
            let value = AnyValue::Int32(v);
            prop_assert_eq!(cell_text(&value), v.to_string());
            prop_assert_eq!(cell_number(&value), Some(f64::from(v)));
        }
    }
}
