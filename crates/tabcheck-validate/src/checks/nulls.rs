//! Null value check.

use polars::prelude::DataFrame;
use serde::Deserialize;
use tabcheck_common::NullTokenSet;
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams};
use tracing::debug;

use crate::check::Check;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NullCheckParams {
    List(Vec<String>),
    Table {
        #[serde(alias = "check_null_values")]
        columns: Vec<String>,
        #[serde(default)]
        custom_null_values: Option<Vec<String>>,
    },
}

/// Fails for every listed column holding at least one null.
///
/// A listed column that is missing from the table is a failure too. Rule-level
/// `custom_null_values` replace the process-wide tokens rather than extending them.
#[derive(Debug, Clone)]
pub struct NullCheck {
    columns: Vec<String>,
    tokens: NullTokenSet,
}

impl NullCheck {
    pub fn new(columns: Vec<String>, tokens: NullTokenSet) -> Self {
        Self { columns, tokens }
    }

    pub fn build(
        params: &RuleParams,
        options: &ProcessOptions,
    ) -> Result<Box<dyn Check>, ParamError> {
        let parsed = params.parse::<NullCheckParams>().map_err(|_| {
            ParamError::Malformed(
                "expected a list of column names or a table with `columns` and optional \
                 `custom_null_values`"
                    .to_string(),
            )
        })?;
        let (columns, custom) = match parsed {
            NullCheckParams::List(columns) => (columns, None),
            NullCheckParams::Table {
                columns,
                custom_null_values,
            } => (columns, custom_null_values),
        };
        if columns.is_empty() {
            return Err(ParamError::invalid("column list is empty"));
        }
        let tokens = match custom {
            Some(tokens) => NullTokenSet::new(tokens),
            None => NullTokenSet::new(options.null_tokens.iter().cloned()),
        };
        Ok(Box::new(Self::new(columns, tokens)))
    }
}

impl Check for NullCheck {
    fn run(&self, df: &DataFrame) -> RuleOutcome {
        let mut outcome = RuleOutcome::pass();
        for name in &self.columns {
            let Ok(column) = df.column(name) else {
                outcome.violation(format!(
                    "Column {name} not found in table; cannot check null values"
                ));
                continue;
            };
            let counted = self.tokens.count(column);
            debug!(column = %name, nulls = counted.count, "counted null values");
            if counted.count == 0 {
                continue;
            }
            let rows = counted
                .sample_rows
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            outcome.violation(format!(
                "Column {name} has {} null values (sample rows: {rows})",
                counted.count
            ));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;

    fn values() -> DataFrame {
        df!["Value1" => ["5", " ", "NA", "7"]].unwrap()
    }

    #[test]
    fn counts_exact_token_matches() {
        let check = NullCheck::new(
            vec!["Value1".to_string()],
            NullTokenSet::new(["", " ", "NA"]),
        );
        let outcome = check.run(&values());
        assert!(!outcome.success);
        assert_eq!(
            outcome.messages,
            vec!["Column Value1 has 2 null values (sample rows: 1, 2)"]
        );
    }

    #[test]
    fn whitespace_is_not_null_unless_listed() {
        let check = NullCheck::new(vec!["Value1".to_string()], NullTokenSet::new(["NA"]));
        let outcome = check.run(&values());
        assert_eq!(
            outcome.messages,
            vec!["Column Value1 has 1 null values (sample rows: 2)"]
        );
    }

    #[test]
    fn missing_column_fails() {
        let check = NullCheck::new(vec!["Other".to_string()], NullTokenSet::default());
        let outcome = check.run(&values());
        assert!(!outcome.success);
        assert!(outcome.messages[0].contains("Other not found"));
    }

    #[test]
    fn custom_tokens_replace_defaults() {
        let options = ProcessOptions::default().with_null_tokens(vec!["NA".to_string()]);
        let params = RuleParams::new(json!({
            "columns": ["Value1"],
            "custom_null_values": [" "],
        }));
        let check = NullCheck::build(&params, &options).unwrap();
        let outcome = check.run(&values());
        assert_eq!(
            outcome.messages,
            vec!["Column Value1 has 1 null values (sample rows: 1)"]
        );
    }

    #[test]
    fn legacy_shape_uses_process_tokens() {
        let options = ProcessOptions::default().with_null_tokens(vec!["NA".to_string()]);
        let params = RuleParams::new(json!({ "check_null_values": ["Value1"] }));
        let check = NullCheck::build(&params, &options).unwrap();
        assert_eq!(
            check.run(&values()).messages,
            vec!["Column Value1 has 1 null values (sample rows: 2)"]
        );
    }

    #[test]
    fn rejects_scalar_params() {
        let params = RuleParams::new(json!("Value1"));
        assert!(NullCheck::build(&params, &ProcessOptions::default()).is_err());
    }
}
