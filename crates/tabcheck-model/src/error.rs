use thiserror::Error;

use crate::rules::StageKind;

/// A rule parameter value that the rule's factory could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The value does not have the expected shape.
    #[error("malformed parameters: {0}")]
    Malformed(String),
    /// The value is well-formed but its content is inconsistent.
    #[error("{0}")]
    Invalid(String),
}

impl ParamError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl From<serde_json::Error> for ParamError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}

/// A single problem found while compiling the rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("rule set #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("duplicate rule set pattern '{pattern}'")]
    DuplicatePattern { pattern: String },

    #[error("rule set '{pattern}', stage {stage}: unknown {kind} rule '{rule}'")]
    UnknownRule {
        pattern: String,
        stage: usize,
        kind: StageKind,
        rule: String,
    },

    #[error("rule set '{pattern}', stage {stage}: rule '{rule}': {source}")]
    InvalidParams {
        pattern: String,
        stage: usize,
        rule: String,
        #[source]
        source: ParamError,
    },
}

/// The rule configuration is inconsistent with the registry.
///
/// Carries every issue found during compilation so they can be fixed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rule configuration: {}", join_issues(.issues))]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigError {
    pub fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
