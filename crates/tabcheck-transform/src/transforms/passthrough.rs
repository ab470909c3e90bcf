use polars::prelude::DataFrame;
use tabcheck_model::{ParamError, ProcessOptions, RuleParams};

use crate::transform::{Transform, TransformFailure, Transformed};

/// Returns the table unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Passthrough {
    pub fn build(
        _params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Transform>, ParamError> {
        Ok(Box::new(Self))
    }
}

impl Transform for Passthrough {
    fn apply(&self, df: &DataFrame) -> Result<Transformed, TransformFailure> {
        Ok(Transformed::new(df.clone()))
    }
}
