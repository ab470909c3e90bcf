//! Null-token classification.
//!
//! A cell is null when it is the loader's native missing value, a NaN/infinite float, or
//! when its string form equals one of the configured tokens exactly. Values are never
//! trimmed before comparison: `" "` is only null if `" "` is itself a token.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column};

use crate::cells::{cell_at, cell_text};

/// Row indices reported per offending column.
pub const SAMPLE_ROWS: usize = 5;

/// True for the native missing marker and non-finite floats.
pub fn is_native_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => !v.is_finite(),
        AnyValue::Float64(v) => !v.is_finite(),
        _ => false,
    }
}

/// Set of string literals treated as null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullTokenSet {
    tokens: BTreeSet<String>,
}

/// Result of counting nulls in one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullCount {
    pub count: usize,
    /// First few row indices holding a null, in row order.
    pub sample_rows: Vec<usize>,
}

impl NullTokenSet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Classify a single value.
    pub fn is_null(&self, value: &AnyValue<'_>) -> bool {
        if is_native_missing(value) {
            return true;
        }
        if self.tokens.is_empty() {
            return false;
        }
        match value {
            AnyValue::String(s) => self.tokens.contains(*s),
            AnyValue::StringOwned(s) => self.tokens.contains(s.as_str()),
            other => self.tokens.contains(cell_text(other).as_ref()),
        }
    }

    /// Count nulls over every row of `column`.
    pub fn count(&self, column: &Column) -> NullCount {
        let mut result = NullCount::default();
        for idx in 0..column.len() {
            if self.is_null(&cell_at(column, idx)) {
                result.count += 1;
                if result.sample_rows.len() < SAMPLE_ROWS {
                    result.sample_rows.push(idx);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn native_missing() {
        assert!(is_native_missing(&AnyValue::Null));
        assert!(is_native_missing(&AnyValue::Float64(f64::NAN)));
        assert!(is_native_missing(&AnyValue::Float64(f64::INFINITY)));
        assert!(is_native_missing(&AnyValue::Float32(f32::NEG_INFINITY)));
        assert!(!is_native_missing(&AnyValue::Float64(0.0)));
        assert!(!is_native_missing(&AnyValue::String("")));
    }

    #[test]
    fn tokens_are_exact_and_case_sensitive() {
        let tokens = NullTokenSet::new(["NA", ""]);
        assert!(tokens.is_null(&AnyValue::String("NA")));
        assert!(tokens.is_null(&AnyValue::String("")));
        assert!(!tokens.is_null(&AnyValue::String("na")));
        assert!(!tokens.is_null(&AnyValue::String(" NA")));
        assert!(!tokens.is_null(&AnyValue::String(" ")));
    }

    #[test]
    fn native_missing_ignores_token_set() {
        let tokens = NullTokenSet::default();
        assert!(tokens.is_null(&AnyValue::Null));
        assert!(tokens.is_null(&AnyValue::Float64(f64::NAN)));
        assert!(!tokens.is_null(&AnyValue::String("")));
    }

    #[test]
    fn numeric_values_compare_by_string_form() {
        let tokens = NullTokenSet::new(["-999"]);
        assert!(tokens.is_null(&AnyValue::Int64(-999)));
        assert!(tokens.is_null(&AnyValue::Float64(-999.0)));
        assert!(!tokens.is_null(&AnyValue::Int64(999)));
    }

    #[test]
    fn counts_with_sample_rows() {
        let column = Column::new("Value1".into(), &["5", " ", "NA", "7"]);
        let tokens = NullTokenSet::new(["", " ", "NA"]);
        let counted = tokens.count(&column);
        assert_eq!(counted.count, 2);
        assert_eq!(counted.sample_rows, vec![1, 2]);
    }

    #[test]
    fn sample_rows_are_capped() {
        let values: Vec<Option<&str>> = vec![None; 8];
        let column = Column::new("A".into(), values);
        let counted = NullTokenSet::default().count(&column);
        assert_eq!(counted.count, 8);
        assert_eq!(counted.sample_rows.len(), SAMPLE_ROWS);
    }
}
