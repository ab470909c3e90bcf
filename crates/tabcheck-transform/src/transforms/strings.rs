//! Text column transformers.

use polars::prelude::{Column, DataFrame, DataType};
use serde::Deserialize;
use tabcheck_model::{ParamError, ProcessOptions, RuleParams};

use crate::transform::{Transform, TransformFailure, Transformed};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StripParams {
    List(Vec<String>),
    Table {
        columns: Vec<String>,
        #[serde(default = "default_true")]
        strip_whitespace: bool,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseParams {
    columns: Vec<String>,
    #[serde(default)]
    to_uppercase: bool,
    #[serde(default)]
    to_lowercase: bool,
}

/// Rewrites the listed text columns value by value.
///
/// Listed columns that are absent or not text are skipped with a message. Nulls stay null.
fn map_text_columns(
    df: &DataFrame,
    columns: &[String],
    f: impl Fn(&str) -> String,
) -> Result<Transformed, TransformFailure> {
    let mut table = df.clone();
    let mut messages = Vec::new();
    for name in columns {
        let Ok(column) = df.column(name) else {
            messages.push(format!("Column {name} not found; skipped"));
            continue;
        };
        if column.dtype() != &DataType::String {
            messages.push(format!("Column {name} is not a text column; skipped"));
            continue;
        }
        let values: Vec<Option<String>> = column.str()?.into_iter().map(|v| v.map(&f)).collect();
        table.with_column(Column::new(name.as_str().into(), values))?;
    }
    Ok(Transformed::with_messages(table, messages))
}

/// Strips leading and trailing whitespace from text columns.
#[derive(Debug, Clone)]
pub struct StripWhitespace {
    columns: Vec<String>,
}

impl StripWhitespace {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// A table with `strip_whitespace = false` builds a transformer with nothing to do.
    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Transform>, ParamError> {
        let parsed = params.parse::<StripParams>().map_err(|_| {
            ParamError::Malformed(
                "expected a list of column names or a table with a `columns` list".to_string(),
            )
        })?;
        let columns = match parsed {
            StripParams::List(columns) => columns,
            StripParams::Table {
                columns,
                strip_whitespace: true,
            } => columns,
            StripParams::Table { .. } => Vec::new(),
        };
        Ok(Box::new(Self::new(columns)))
    }
}

impl Transform for StripWhitespace {
    fn apply(&self, df: &DataFrame) -> Result<Transformed, TransformFailure> {
        map_text_columns(df, &self.columns, |s| s.trim().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    Upper,
    Lower,
}

/// Converts text columns to upper or lower case.
#[derive(Debug, Clone)]
pub struct CaseTransform {
    columns: Vec<String>,
    case: LetterCase,
}

impl CaseTransform {
    pub fn new(columns: Vec<String>, case: LetterCase) -> Self {
        Self { columns, case }
    }

    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Transform>, ParamError> {
        let parsed: CaseParams = params.parse()?;
        let case = match (parsed.to_uppercase, parsed.to_lowercase) {
            (true, false) => LetterCase::Upper,
            (false, true) => LetterCase::Lower,
            (true, true) => {
                return Err(ParamError::invalid(
                    "to_uppercase and to_lowercase cannot both be set",
                ));
            }
            (false, false) => {
                return Err(ParamError::invalid(
                    "one of to_uppercase or to_lowercase must be set",
                ));
            }
        };
        Ok(Box::new(Self::new(parsed.columns, case)))
    }
}

impl Transform for CaseTransform {
    fn apply(&self, df: &DataFrame) -> Result<Transformed, TransformFailure> {
        match self.case {
            LetterCase::Upper => map_text_columns(df, &self.columns, str::to_uppercase),
            LetterCase::Lower => map_text_columns(df, &self.columns, str::to_lowercase),
        }
    }
}
