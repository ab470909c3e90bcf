//! Single-stage execution.

use polars::prelude::DataFrame;
use tabcheck_model::{RuleRecord, StageKind};
use tracing::{debug, warn};

use crate::plan::CompiledStage;

/// What running one stage produced.
#[derive(Debug, Clone)]
pub struct StageResult {
    /// AND over every rule outcome that ran.
    pub success: bool,
    pub records: Vec<RuleRecord>,
    /// Unchanged after a validation stage. After a transformation stage, the output of
    /// the last transformer that succeeded.
    pub table: DataFrame,
    /// At least one transformer produced a new table.
    pub transformed: bool,
}

/// Runs the rules of one stage against a table.
#[derive(Debug, Clone, Copy)]
pub struct StageRunner<'a> {
    index: usize,
    stage: &'a CompiledStage,
}

impl<'a> StageRunner<'a> {
    pub fn new(index: usize, stage: &'a CompiledStage) -> Self {
        Self { index, stage }
    }

    /// Validation stages run every rule. Transformation stages stop at the first
    /// failing transformer.
    pub fn run(&self, table: DataFrame) -> StageResult {
        match self.stage {
            CompiledStage::Validation(rules) => {
                let mut records = Vec::with_capacity(rules.len());
                for (name, check) in rules {
                    let outcome = check.run(&table);
                    if outcome.success {
                        debug!(stage = self.index, rule = %name, "validation passed");
                    } else {
                        warn!(
                            stage = self.index,
                            rule = %name,
                            violations = outcome.messages.len(),
                            "validation failed"
                        );
                    }
                    records.push(self.record(name, outcome.success, outcome.messages));
                }
                StageResult {
                    success: records.iter().all(|r| r.success),
                    records,
                    table,
                    transformed: false,
                }
            }
            CompiledStage::Transformation(rules) => {
                let mut records = Vec::with_capacity(rules.len());
                let mut table = table;
                let mut transformed = false;
                for (name, transform) in rules {
                    match transform.apply(&table) {
                        Ok(output) => {
                            debug!(stage = self.index, rule = %name, "transformation applied");
                            records.push(self.record(name, true, output.messages));
                            table = output.table;
                            transformed = true;
                        }
                        Err(failure) => {
                            warn!(
                                stage = self.index,
                                rule = %name,
                                error = %failure,
                                "transformation failed; stage aborted"
                            );
                            records.push(self.record(name, false, failure.messages));
                            return StageResult {
                                success: false,
                                records,
                                table,
                                transformed,
                            };
                        }
                    }
                }
                StageResult {
                    success: true,
                    records,
                    table,
                    transformed,
                }
            }
        }
    }

    fn record(&self, rule: &str, success: bool, messages: Vec<String>) -> RuleRecord {
        RuleRecord {
            stage_index: self.index,
            stage_kind: self.stage.kind(),
            rule: rule.to_string(),
            success,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;
    use tabcheck_model::{ProcessOptions, RuleParams};

    use crate::registry::Registry;

    fn frame() -> DataFrame {
        df![
            "region" => [" north", "south "],
            "Revenue" => [10i64, 200],
        ]
        .unwrap()
    }

    fn validation(rules: &[(&str, serde_json::Value)]) -> CompiledStage {
        let registry = Registry::with_builtins();
        let options = ProcessOptions::default();
        CompiledStage::Validation(
            rules
                .iter()
                .map(|(name, params)| {
                    let check = registry
                        .build_validator(name, &RuleParams::new(params.clone()), &options)
                        .unwrap()
                        .unwrap();
                    (name.to_string(), check)
                })
                .collect(),
        )
    }

    fn transformation(rules: &[(&str, serde_json::Value)]) -> CompiledStage {
        let registry = Registry::with_builtins();
        let options = ProcessOptions::default();
        CompiledStage::Transformation(
            rules
                .iter()
                .map(|(name, params)| {
                    let transform = registry
                        .build_transformer(name, &RuleParams::new(params.clone()), &options)
                        .unwrap()
                        .unwrap();
                    (name.to_string(), transform)
                })
                .collect(),
        )
    }

    #[test]
    fn validation_runs_every_rule() {
        let stage = validation(&[
            ("required_columns", json!(["Units"])),
            ("value_range", json!({ "Revenue": { "max": 100 } })),
            ("not_empty", json!({})),
        ]);
        let result = StageRunner::new(0, &stage).run(frame());
        assert!(!result.success);
        let outcomes: Vec<(&str, bool)> = result
            .records
            .iter()
            .map(|r| (r.rule.as_str(), r.success))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("required_columns", false),
                ("value_range", false),
                ("not_empty", true),
            ]
        );
        assert!(result.table.equals(&frame()));
        assert!(!result.transformed);
    }

    #[test]
    fn transformers_chain() {
        let stage = transformation(&[
            ("rename_columns", json!({ "region": "Region" })),
            ("strip_whitespace", json!(["Region"])),
        ]);
        let result = StageRunner::new(1, &stage).run(frame());
        assert!(result.success);
        assert!(result.transformed);
        let regions: Vec<Option<&str>> = result
            .table
            .column("Region")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(regions, vec![Some("north"), Some("south")]);
        assert!(result.records.iter().all(|r| r.stage_index == 1));
    }

    #[test]
    fn first_failure_aborts_and_keeps_last_good_table() {
        let stage = transformation(&[
            ("strip_whitespace", json!(["region"])),
            ("rename_columns", json!({ "missing": "Other" })),
            ("case_transform", json!({ "columns": ["region"], "to_uppercase": true })),
        ]);
        let result = StageRunner::new(0, &stage).run(frame());
        assert!(!result.success);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].rule, "rename_columns");
        assert!(!result.records[1].success);
        let regions: Vec<Option<&str>> = result
            .table
            .column("region")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(regions, vec![Some("north"), Some("south")]);
    }
}
