use polars::prelude::DataFrame;
use tabcheck_model::{ParamError, ProcessOptions, RuleOutcome, RuleParams};

use crate::check::Check;

/// Fails when the table has no rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEmpty;

impl NotEmpty {
    /// Takes no parameters; anything supplied is ignored.
    pub fn build(
        _params: &RuleParams,
        _options: &ProcessOptions,
    ) -> Result<Box<dyn Check>, ParamError> {
        Ok(Box::new(Self))
    }
}

impl Check for NotEmpty {
    fn run(&self, df: &DataFrame) -> RuleOutcome {
        if df.height() == 0 {
            RuleOutcome::fail("The table has no rows")
        } else {
            RuleOutcome::pass()
        }
    }
}
