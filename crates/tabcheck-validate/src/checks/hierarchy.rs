//! Functional dependency check between column groups.

use indexmap::IndexMap;
use polars::prelude::{AnyValue, Column, DataFrame};
use serde::Deserialize;
use tabcheck_common::cell_text;
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams};
use tracing::debug;

use crate::check::{Check, missing_columns};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HierarchyParams {
    higher_level_columns: Vec<String>,
    lower_level_columns: Vec<String>,
}

/// Each combination of lower-level values must map to exactly one combination of
/// higher-level values.
///
/// Every offending lower-level key is reported together with all of its distinct
/// higher-level combinations, in the order they first appear.
#[derive(Debug, Clone)]
pub struct HierarchyCheck {
    higher: Vec<String>,
    lower: Vec<String>,
}

impl HierarchyCheck {
    pub fn new(higher: Vec<String>, lower: Vec<String>) -> Self {
        Self { higher, lower }
    }

    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Check>, ParamError> {
        let parsed: HierarchyParams = params.parse()?;
        if parsed.higher_level_columns.is_empty() {
            return Err(ParamError::invalid("higher_level_columns is empty"));
        }
        if parsed.lower_level_columns.is_empty() {
            return Err(ParamError::invalid("lower_level_columns is empty"));
        }
        Ok(Box::new(Self::new(
            parsed.higher_level_columns,
            parsed.lower_level_columns,
        )))
    }
}

/// Cell values of one row. Missing cells stay `None` so they never collide with a
/// literal `"null"` string.
type RowKey = Vec<Option<String>>;

fn cell(column: &Column, idx: usize) -> Option<String> {
    match column.get(idx) {
        Ok(AnyValue::Null) | Err(_) => None,
        Ok(value) => Some(cell_text(&value).into_owned()),
    }
}

fn row_values(columns: &[&Column], idx: usize) -> RowKey {
    columns.iter().map(|column| cell(column, idx)).collect()
}

fn display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

fn render_key(names: &[String], values: &[Option<String>]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{name}={}", display(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_group<T: AsRef<str>>(values: &[T]) -> String {
    match values {
        [single] => single.as_ref().to_string(),
        _ => format!(
            "({})",
            values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
        ),
    }
}

impl Check for HierarchyCheck {
    fn run(&self, df: &DataFrame) -> RuleOutcome {
        let mut missing = missing_columns(df, &self.lower);
        missing.extend(missing_columns(df, &self.higher));
        if !missing.is_empty() {
            return RuleOutcome::fail(format!(
                "Hierarchy columns not found in table: {}",
                missing.join(", ")
            ));
        }

        let lookup = |names: &[String]| -> Vec<&Column> {
            names
                .iter()
                .filter_map(|name| df.column(name).ok())
                .collect()
        };
        let lower = lookup(&self.lower);
        let higher = lookup(&self.higher);

        let mut seen: IndexMap<RowKey, Vec<RowKey>> = IndexMap::new();
        for idx in 0..df.height() {
            let key = row_values(&lower, idx);
            let parent = row_values(&higher, idx);
            let parents = seen.entry(key).or_default();
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }

        let higher_label = render_group(&self.higher);
        let messages = seen
            .iter()
            .filter(|(_, parents)| parents.len() > 1)
            .map(|(key, parents)| {
                let listed = parents
                    .iter()
                    .map(|p| render_group(&p.iter().map(display).collect::<Vec<_>>()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{} maps to {} distinct {higher_label} values: {listed}",
                    render_key(&self.lower, key),
                    parents.len()
                )
            })
            .collect::<Vec<_>>();
        debug!(
            keys = seen.len(),
            conflicts = messages.len(),
            "checked hierarchy"
        );
        RuleOutcome::from_messages(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn check() -> HierarchyCheck {
        HierarchyCheck::new(vec!["Category".to_string()], vec!["Id".to_string()])
    }

    #[test]
    fn reports_conflicting_parents() {
        let df = df![
            "Category" => ["A", "B"],
            "Id" => [1i64, 1],
        ]
        .unwrap();
        let outcome = check().run(&df);
        assert!(!outcome.success);
        assert_eq!(
            outcome.messages,
            vec!["Id=1 maps to 2 distinct Category values: A, B"]
        );
    }

    #[test]
    fn consistent_mapping_passes() {
        let df = df![
            "Category" => ["A", "A", "B"],
            "Id" => [1i64, 1, 2],
        ]
        .unwrap();
        assert!(check().run(&df).success);
    }

    #[test]
    fn composite_keys() {
        let df = df![
            "Region" => ["N", "N", "S"],
            "Country" => ["X", "X", "X"],
            "Store" => [1i64, 1, 1],
            "Till" => [7i64, 7, 8],
        ]
        .unwrap();
        let check = HierarchyCheck::new(
            vec!["Region".to_string(), "Country".to_string()],
            vec!["Store".to_string(), "Till".to_string()],
        );
        assert!(check.run(&df).success);

        let df = df![
            "Region" => ["N", "S"],
            "Country" => ["X", "X"],
            "Store" => [1i64, 1],
            "Till" => [7i64, 7],
        ]
        .unwrap();
        assert_eq!(
            check.run(&df).messages,
            vec!["Store=1, Till=7 maps to 2 distinct (Region, Country) values: (N, X), (S, X)"]
        );
    }

    #[test]
    fn missing_cells_are_distinct_from_null_text() {
        let df = df![
            "Category" => ["A", "B"],
            "Id" => [None, Some("null")],
        ]
        .unwrap();
        assert!(check().run(&df).success);
    }

    #[test]
    fn missing_cells_group_together() {
        let df = df![
            "Category" => [Some("A"), None],
            "Id" => [None::<&str>, None],
        ]
        .unwrap();
        assert_eq!(
            check().run(&df).messages,
            vec!["Id=null maps to 2 distinct Category values: A, null"]
        );
    }

    #[test]
    fn missing_columns_fail() {
        let df = df!["Id" => [1i64]].unwrap();
        let outcome = check().run(&df);
        assert_eq!(
            outcome.messages,
            vec!["Hierarchy columns not found in table: Category"]
        );
    }
}
