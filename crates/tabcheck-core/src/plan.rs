//! Compiling a rule configuration into an executable plan.

use std::collections::HashSet;
use std::path::Path;

use tabcheck_model::{
    ConfigError, ConfigIssue, ParamError, ProcessOptions, RuleSetConfig, RulesConfig, StageConfig,
    StageKind,
};
use tabcheck_transform::Transform;
use tabcheck_validate::Check;
use tracing::debug;

use crate::matcher::PatternMatcher;
use crate::registry::Registry;

/// One stage with every rule built and ready to run, in configuration order.
#[derive(Debug)]
pub enum CompiledStage {
    Validation(Vec<(String, Box<dyn Check>)>),
    Transformation(Vec<(String, Box<dyn Transform>)>),
}

impl CompiledStage {
    pub fn kind(&self) -> StageKind {
        match self {
            CompiledStage::Validation(_) => StageKind::Validation,
            CompiledStage::Transformation(_) => StageKind::Transformation,
        }
    }

    pub fn rule_names(&self) -> Vec<&str> {
        match self {
            CompiledStage::Validation(rules) => rules.iter().map(|(n, _)| n.as_str()).collect(),
            CompiledStage::Transformation(rules) => {
                rules.iter().map(|(n, _)| n.as_str()).collect()
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CompiledStage::Validation(rules) => rules.len(),
            CompiledStage::Transformation(rules) => rules.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct CompiledRuleSet {
    pub pattern: String,
    pub stages: Vec<CompiledStage>,
}

impl CompiledRuleSet {
    pub fn has_transformations(&self) -> bool {
        self.stages
            .iter()
            .any(|stage| stage.kind() == StageKind::Transformation)
    }
}

/// The immutable result of compiling a [`RulesConfig`] against a [`Registry`].
#[derive(Debug)]
pub struct RulePlan {
    options: ProcessOptions,
    rule_sets: Vec<CompiledRuleSet>,
    matcher: PatternMatcher,
}

impl RulePlan {
    /// Resolves every rule name and parses every parameter value.
    ///
    /// All problems are collected and returned together; a plan is only produced when
    /// there are none.
    pub fn compile(config: &RulesConfig, registry: &Registry) -> Result<Self, ConfigError> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        let mut rule_sets = Vec::with_capacity(config.rule_sets.len());

        for (index, rule_set) in config.rule_sets.iter().enumerate() {
            if rule_set.pattern.is_empty() {
                issues.push(ConfigIssue::EmptyPattern { index });
            } else if !seen.insert(rule_set.pattern.as_str()) {
                issues.push(ConfigIssue::DuplicatePattern {
                    pattern: rule_set.pattern.clone(),
                });
            }
            rule_sets.push(compile_rule_set(
                rule_set,
                registry,
                &config.options,
                &mut issues,
            ));
        }

        if !issues.is_empty() {
            return Err(ConfigError::new(issues));
        }

        debug!(rule_sets = rule_sets.len(), "compiled rule plan");
        let matcher = PatternMatcher::new(rule_sets.iter().map(|rs| rs.pattern.clone()));
        Ok(Self {
            options: config.options.clone(),
            rule_sets,
            matcher,
        })
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    pub fn rule_sets(&self) -> &[CompiledRuleSet] {
        &self.rule_sets
    }

    /// The rule set governing `path`, chosen by its base name.
    pub fn resolve(&self, path: &Path) -> Option<&CompiledRuleSet> {
        self.matcher
            .resolve_path(path)
            .and_then(|idx| self.rule_sets.get(idx))
    }
}

fn compile_rule_set(
    config: &RuleSetConfig,
    registry: &Registry,
    options: &ProcessOptions,
    issues: &mut Vec<ConfigIssue>,
) -> CompiledRuleSet {
    let stages = config
        .stages
        .iter()
        .enumerate()
        .map(|(stage_index, stage)| {
            compile_stage(&config.pattern, stage_index, stage, registry, options, issues)
        })
        .collect();
    CompiledRuleSet {
        pattern: config.pattern.clone(),
        stages,
    }
}

fn compile_stage(
    pattern: &str,
    stage_index: usize,
    stage: &StageConfig,
    registry: &Registry,
    options: &ProcessOptions,
    issues: &mut Vec<ConfigIssue>,
) -> CompiledStage {
    let issue = |rule: &str, error: Option<ParamError>| match error {
        None => ConfigIssue::UnknownRule {
            pattern: pattern.to_string(),
            stage: stage_index,
            kind: stage.kind,
            rule: rule.to_string(),
        },
        Some(source) => ConfigIssue::InvalidParams {
            pattern: pattern.to_string(),
            stage: stage_index,
            rule: rule.to_string(),
            source,
        },
    };

    match stage.kind {
        StageKind::Validation => {
            let mut rules = Vec::with_capacity(stage.rules.len());
            for (name, params) in &stage.rules {
                match registry.build_validator(name, params, options) {
                    Some(Ok(check)) => rules.push((name.clone(), check)),
                    Some(Err(e)) => issues.push(issue(name, Some(e))),
                    None => issues.push(issue(name, None)),
                }
            }
            CompiledStage::Validation(rules)
        }
        StageKind::Transformation => {
            let mut rules = Vec::with_capacity(stage.rules.len());
            for (name, params) in &stage.rules {
                match registry.build_transformer(name, params, options) {
                    Some(Ok(transform)) => rules.push((name.clone(), transform)),
                    Some(Err(e)) => issues.push(issue(name, Some(e))),
                    None => issues.push(issue(name, None)),
                }
            }
            CompiledStage::Transformation(rules)
        }
    }
}
