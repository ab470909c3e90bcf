use indexmap::IndexMap;
use polars::prelude::{Column, DataFrame};
use tabcheck_model::{ParamError, ProcessOptions, RuleParams};

use crate::transform::{Transform, TransformFailure, Transformed};

/// Renames columns according to an `old = "new"` mapping.
///
/// All renames apply at once, so swapping two names works. Fails without renaming
/// anything when a source column is absent or the result would hold duplicate names.
#[derive(Debug, Clone)]
pub struct RenameColumns {
    mapping: IndexMap<String, String>,
}

impl RenameColumns {
    pub fn new(mapping: IndexMap<String, String>) -> Self {
        Self { mapping }
    }

    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Transform>, ParamError> {
        let mapping: IndexMap<String, String> = params.parse()?;
        if mapping.is_empty() {
            return Err(ParamError::invalid("no columns to rename"));
        }
        if let Some((old, _)) = mapping.iter().find(|(_, new)| new.is_empty()) {
            return Err(ParamError::invalid(format!(
                "column {old} would be renamed to an empty name"
            )));
        }
        Ok(Box::new(Self::new(mapping)))
    }
}

impl Transform for RenameColumns {
    fn apply(&self, df: &DataFrame) -> Result<Transformed, TransformFailure> {
        let current: Vec<&str> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();

        let missing: Vec<&str> = self
            .mapping
            .keys()
            .map(String::as_str)
            .filter(|old| !current.contains(old))
            .collect();
        if !missing.is_empty() {
            return Err(TransformFailure::new(format!(
                "Cannot rename missing columns: {}",
                missing.join(", ")
            )));
        }

        let renamed: Vec<&str> = current
            .iter()
            .map(|name| self.mapping.get(*name).map_or(*name, String::as_str))
            .collect();
        let mut duplicates: Vec<&str> = Vec::new();
        for (idx, name) in renamed.iter().enumerate() {
            if renamed[..idx].contains(name) && !duplicates.contains(name) {
                duplicates.push(*name);
            }
        }
        if !duplicates.is_empty() {
            return Err(TransformFailure::new(format!(
                "Renaming would produce duplicate columns: {}",
                duplicates.join(", ")
            )));
        }

        let columns: Vec<Column> = df
            .get_columns()
            .iter()
            .zip(&renamed)
            .map(|(column, name)| column.clone().with_name((*name).into()))
            .collect();
        Ok(Transformed::new(DataFrame::new(columns)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;

    fn frame() -> DataFrame {
        df![
            "rev" => [1i64, 2],
            "region" => ["N", "S"],
        ]
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect()
    }

    fn build(params: serde_json::Value) -> Box<dyn Transform> {
        RenameColumns::build(&RuleParams::new(params), &ProcessOptions::default()).unwrap()
    }

    #[test]
    fn renames_in_place_order() {
        let out = build(json!({ "rev": "Revenue" })).apply(&frame()).unwrap();
        assert_eq!(names(&out.table), vec!["Revenue", "region"]);
    }

    #[test]
    fn swaps_names() {
        let out = build(json!({ "rev": "region", "region": "rev" }))
            .apply(&frame())
            .unwrap();
        assert_eq!(names(&out.table), vec!["region", "rev"]);
    }

    #[test]
    fn missing_source_fails() {
        let err = build(json!({ "cost": "Cost" })).apply(&frame()).unwrap_err();
        assert_eq!(err.messages, vec!["Cannot rename missing columns: cost"]);
    }

    #[test]
    fn collision_fails() {
        let err = build(json!({ "rev": "region" })).apply(&frame()).unwrap_err();
        assert_eq!(
            err.messages,
            vec!["Renaming would produce duplicate columns: region"]
        );
    }

    #[test]
    fn rejects_non_string_targets() {
        let params = RuleParams::new(json!({ "rev": 3 }));
        assert!(RenameColumns::build(&params, &ProcessOptions::default()).is_err());
    }
}
