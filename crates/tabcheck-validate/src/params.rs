//! Parameter shapes shared by several checks.

use serde::Deserialize;
use tabcheck_model::{ParamError, RuleParams};

/// A column list, written either bare (`["A", "B"]`) or as `{ columns = [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColumnListParam {
    List(Vec<String>),
    Table { columns: Vec<String> },
}

pub(crate) fn column_list(params: &RuleParams) -> Result<Vec<String>, ParamError> {
    let columns = match params.parse::<ColumnListParam>() {
        Ok(ColumnListParam::List(columns) | ColumnListParam::Table { columns }) => columns,
        Err(_) => {
            return Err(ParamError::Malformed(
                "expected a list of column names or a table with a `columns` list".to_string(),
            ));
        }
    };
    if columns.is_empty() {
        return Err(ParamError::invalid("column list is empty"));
    }
    Ok(columns)
}
