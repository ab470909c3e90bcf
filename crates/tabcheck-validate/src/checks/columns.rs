//! Column presence checks.

use polars::prelude::DataFrame;
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams};

use crate::check::{Check, missing_columns};
use crate::params::column_list;

/// Fails when any of the listed columns is absent from the table.
#[derive(Debug, Clone)]
pub struct RequiredColumns {
    columns: Vec<String>,
}

impl RequiredColumns {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Check>, ParamError> {
        Ok(Box::new(Self::new(column_list(params)?)))
    }
}

impl Check for RequiredColumns {
    fn run(&self, df: &DataFrame) -> RuleOutcome {
        let missing = missing_columns(df, &self.columns);
        if missing.is_empty() {
            RuleOutcome::pass()
        } else {
            RuleOutcome::fail(format!("Missing columns: {}", missing.join(", ")))
        }
    }
}

/// Fails when the table carries a column outside the allowed list.
#[derive(Debug, Clone)]
pub struct AdditionalColumns {
    allowed: Vec<String>,
}

impl AdditionalColumns {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Check>, ParamError> {
        Ok(Box::new(Self::new(column_list(params)?)))
    }
}

impl Check for AdditionalColumns {
    fn run(&self, df: &DataFrame) -> RuleOutcome {
        let extra: Vec<&str> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .filter(|name| !self.allowed.iter().any(|allowed| allowed == name))
            .collect();
        if extra.is_empty() {
            RuleOutcome::pass()
        } else {
            RuleOutcome::fail(format!("Additional columns found: {}", extra.join(", ")))
        }
    }
}
