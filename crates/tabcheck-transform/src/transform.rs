use std::fmt;

use polars::prelude::{DataFrame, PolarsError};
use tabcheck_model::{ParamError, ProcessOptions, RuleParams};
use thiserror::Error;

use crate::formula::FormulaError;

/// A transformation rule with its parameters already parsed.
pub trait Transform: Send + Sync + fmt::Debug {
    /// Produce a new table from `df`. The input is never modified.
    fn apply(&self, df: &DataFrame) -> Result<Transformed, TransformFailure>;
}

/// Builds a [`Transform`] from configuration parameters.
pub type TransformFactory =
    fn(&RuleParams, &ProcessOptions) -> Result<Box<dyn Transform>, ParamError>;

/// A successful transformation: the new table plus any informational messages.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub table: DataFrame,
    pub messages: Vec<String>,
}

impl Transformed {
    pub fn new(table: DataFrame) -> Self {
        Self {
            table,
            messages: Vec::new(),
        }
    }

    pub fn with_messages(table: DataFrame, messages: Vec<String>) -> Self {
        Self { table, messages }
    }
}

/// A failed transformation. Aborts the stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct TransformFailure {
    pub messages: Vec<String>,
}

impl TransformFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn from_messages(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

impl From<PolarsError> for TransformFailure {
    fn from(error: PolarsError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<FormulaError> for TransformFailure {
    fn from(error: FormulaError) -> Self {
        Self::new(error.to_string())
    }
}
