//! Numeric range check.

use indexmap::IndexMap;
use polars::prelude::{Column, DataFrame};
use serde::Deserialize;
use tabcheck_common::{NullTokenSet, cell_at, cell_number, format_number};
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams};
use tracing::debug;

use crate::check::Check;

/// Inclusive bounds for one column. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueBounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Fails when a non-null value lies outside its column's bounds.
///
/// Nulls (native or token) are skipped. Values that cannot be read as numbers are
/// counted and reported separately.
#[derive(Debug, Clone)]
pub struct ValueRange {
    bounds: IndexMap<String, ValueBounds>,
    tokens: NullTokenSet,
}

#[derive(Debug, Default)]
struct RangeTally {
    below: usize,
    above: usize,
    non_numeric: usize,
}

impl ValueRange {
    pub fn new(bounds: IndexMap<String, ValueBounds>, tokens: NullTokenSet) -> Self {
        Self { bounds, tokens }
    }

    pub fn build(
        params: &RuleParams,
        options: &ProcessOptions,
    ) -> Result<Box<dyn Check>, ParamError> {
        let bounds: IndexMap<String, ValueBounds> = params.parse()?;
        if bounds.is_empty() {
            return Err(ParamError::invalid("no columns given"));
        }
        for (column, b) in &bounds {
            if let (Some(min), Some(max)) = (b.min, b.max)
                && min > max
            {
                return Err(ParamError::invalid(format!(
                    "column {column}: min {} is greater than max {}",
                    format_number(min),
                    format_number(max)
                )));
            }
        }
        let tokens = NullTokenSet::new(options.null_tokens.iter().cloned());
        Ok(Box::new(Self::new(bounds, tokens)))
    }

    fn tally(&self, column: &Column, b: ValueBounds) -> RangeTally {
        let mut tally = RangeTally::default();
        for idx in 0..column.len() {
            let value = cell_at(column, idx);
            if self.tokens.is_null(&value) {
                continue;
            }
            let Some(number) = cell_number(&value) else {
                tally.non_numeric += 1;
                continue;
            };
            if b.min.is_some_and(|min| number < min) {
                tally.below += 1;
            }
            if b.max.is_some_and(|max| number > max) {
                tally.above += 1;
            }
        }
        tally
    }
}

impl Check for ValueRange {
    fn run(&self, df: &DataFrame) -> RuleOutcome {
        let mut outcome = RuleOutcome::pass();
        for (name, b) in &self.bounds {
            let Ok(column) = df.column(name) else {
                outcome.violation(format!("Column {name} not found in table"));
                continue;
            };
            let tally = self.tally(column, *b);
            debug!(
                column = %name,
                below = tally.below,
                above = tally.above,
                non_numeric = tally.non_numeric,
                "checked value range"
            );
            if let Some(min) = b.min
                && tally.below > 0
            {
                outcome.violation(format!(
                    "Column {name} has {} values below minimum {}",
                    tally.below,
                    format_number(min)
                ));
            }
            if let Some(max) = b.max
                && tally.above > 0
            {
                outcome.violation(format!(
                    "Column {name} has {} values above maximum {}",
                    tally.above,
                    format_number(max)
                ));
            }
            if tally.non_numeric > 0 {
                outcome.violation(format!(
                    "Column {name} has {} non-numeric values",
                    tally.non_numeric
                ));
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;

    fn build(params: serde_json::Value) -> Box<dyn Check> {
        ValueRange::build(&RuleParams::new(params), &ProcessOptions::default()).unwrap()
    }

    #[test]
    fn counts_each_side() {
        let df = df!["Revenue" => [-1i64, 50, 150]].unwrap();
        let outcome = build(json!({ "Revenue": { "min": 0, "max": 100 } })).run(&df);
        assert!(!outcome.success);
        assert_eq!(
            outcome.messages,
            vec![
                "Column Revenue has 1 values below minimum 0",
                "Column Revenue has 1 values above maximum 100",
            ]
        );
    }

    #[test]
    fn bounds_are_inclusive_and_optional() {
        let df = df!["Revenue" => [0.0f64, 100.0, 1e9]].unwrap();
        assert!(build(json!({ "Revenue": { "min": 0 } })).run(&df).success);
        let df = df!["Revenue" => [0.0f64, 100.0]].unwrap();
        assert!(build(json!({ "Revenue": { "min": 0, "max": 100 } })).run(&df).success);
    }

    #[test]
    fn skips_nulls_and_counts_text() {
        let df = df!["Units" => [Some("3"), None, Some(""), Some("many")]].unwrap();
        let outcome = build(json!({ "Units": { "max": 10 } })).run(&df);
        assert_eq!(outcome.messages, vec!["Column Units has 1 non-numeric values"]);
    }

    #[test]
    fn missing_column_fails() {
        let df = df!["Revenue" => [1i64]].unwrap();
        let outcome = build(json!({ "Cost": { "min": 0 } })).run(&df);
        assert_eq!(outcome.messages, vec!["Column Cost not found in table"]);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let params = RuleParams::new(json!({ "Revenue": { "min": 5, "max": 1 } }));
        let err = ValueRange::build(&params, &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, ParamError::Invalid(_)));
    }
}
