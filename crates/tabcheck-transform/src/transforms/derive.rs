use polars::prelude::DataFrame;
use serde::Deserialize;
use tabcheck_model::{ParamError, ProcessOptions, RuleParams};
use tracing::debug;

use crate::formula::Formula;
use crate::transform::{Transform, TransformFailure, Transformed};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeriveParams {
    target: String,
    formula: String,
    #[serde(default)]
    fail_on_division_by_zero: bool,
}

/// Adds (or replaces) a `Float64` column computed from a formula.
#[derive(Debug, Clone)]
pub struct DeriveColumn {
    target: String,
    formula: Formula,
    fail_on_division_by_zero: bool,
}

impl DeriveColumn {
    pub fn new(target: impl Into<String>, formula: Formula) -> Self {
        Self {
            target: target.into(),
            formula,
            fail_on_division_by_zero: false,
        }
    }

    pub fn fail_on_division_by_zero(mut self, fail: bool) -> Self {
        self.fail_on_division_by_zero = fail;
        self
    }

    /// Parses the formula, so syntax errors surface as parameter errors.
    pub fn build(
        params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Transform>, ParamError> {
        let parsed: DeriveParams = params.parse()?;
        if parsed.target.is_empty() {
            return Err(ParamError::invalid("target column name is empty"));
        }
        let formula = Formula::parse(&parsed.formula)
            .map_err(|e| ParamError::invalid(format!("formula '{}': {e}", parsed.formula)))?;
        Ok(Box::new(
            Self::new(parsed.target, formula)
                .fail_on_division_by_zero(parsed.fail_on_division_by_zero),
        ))
    }
}

impl Transform for DeriveColumn {
    fn apply(&self, df: &DataFrame) -> Result<Transformed, TransformFailure> {
        let output = self.formula.evaluate(df)?;
        let mut messages = Vec::new();
        if output.division_by_zero > 0 {
            let message = format!(
                "{} rows divided by zero in '{}'; {} set to null",
                output.division_by_zero, self.formula, self.target
            );
            if self.fail_on_division_by_zero {
                return Err(TransformFailure::new(message));
            }
            messages.push(message);
        }
        debug!(target = %self.target, formula = %self.formula, "derived column");
        let mut table = df.clone();
        table.with_column(output.into_column(&self.target))?;
        Ok(Transformed::with_messages(table, messages))
    }
}
