use std::fmt;

use polars::prelude::DataFrame;
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams};

/// A validation rule with its parameters already parsed.
pub trait Check: Send + Sync + fmt::Debug {
    /// Evaluate the whole table and report every violation found.
    fn run(&self, df: &DataFrame) -> RuleOutcome;
}

/// Builds a [`Check`] from configuration parameters.
///
/// Called while the configuration is compiled, so parameter errors surface before any
/// file is read.
pub type CheckFactory = fn(&RuleParams, &ProcessOptions) -> Result<Box<dyn Check>, ParamError>;

/// Names from `columns` that are not present in `df`, in the order given.
pub fn missing_columns<'a>(df: &DataFrame, columns: &'a [String]) -> Vec<&'a str> {
    columns
        .iter()
        .filter(|name| df.column(name.as_str()).is_err())
        .map(String::as_str)
        .collect()
}
