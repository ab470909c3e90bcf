//! Declarative rule configuration.
//!
//! A [`RulesConfig`] is produced by the configuration loader and compiled by the engine
//! before any file is processed. Declaration order is meaningful everywhere: rule sets are
//! tried in order on specificity ties, stages run in order, and rules inside a stage run
//! in the order they were written.

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::options::ProcessOptions;

/// Whether a stage checks the table or rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Validation,
    Transformation,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Transformation => "transformation",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque rule parameters as written in the configuration.
///
/// Only the factory registered for a rule interprets them, typically by calling
/// [`RuleParams::parse`] into its own parameter struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleParams(serde_json::Value);

impl RuleParams {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Parameters for rules that take none.
    pub fn empty() -> Self {
        Self(serde_json::Value::Null)
    }

    /// True for `null`, `{}`, `[]` and `true` (a bare `rule = true` switch).
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null | serde_json::Value::Bool(true) => true,
            serde_json::Value::Object(map) => map.is_empty(),
            serde_json::Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Deserialize the parameters into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Malformed`] when the value does not fit `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ParamError> {
        Ok(serde_json::from_value(self.0.clone())?)
    }
}

impl From<serde_json::Value> for RuleParams {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// One stage: a kind and an ordered mapping of rule name to parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub kind: StageKind,
    #[serde(default)]
    pub rules: IndexMap<String, RuleParams>,
}

impl StageConfig {
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            rules: IndexMap::new(),
        }
    }

    pub fn validation() -> Self {
        Self::new(StageKind::Validation)
    }

    pub fn transformation() -> Self {
        Self::new(StageKind::Transformation)
    }

    /// Append a rule, keeping declaration order.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, params: impl Into<RuleParams>) -> Self {
        self.rules.insert(name.into(), params.into());
        self
    }
}

/// Stages bound to a file-name pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    pub pattern: String,
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

impl RuleSetConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            stages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_stage(mut self, stage: StageConfig) -> Self {
        self.stages.push(stage);
        self
    }
}

/// Everything the configuration loader produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub options: ProcessOptions,
    #[serde(default)]
    pub rule_sets: Vec<RuleSetConfig>,
}
