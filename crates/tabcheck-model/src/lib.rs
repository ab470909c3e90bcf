//! Shared data model for tabcheck.
//!
//! Configuration types ([`RulesConfig`], [`RuleSetConfig`], [`StageConfig`]) describe what
//! the engine should run; [`RuleOutcome`] is what a single rule returns; [`FileReport`] is
//! what the engine hands to report writers once a file has been processed.

pub mod error;
pub mod options;
pub mod outcome;
pub mod report;
pub mod rules;

pub use error::{ConfigError, ConfigIssue, ParamError};
pub use options::{OutputFormat, ProcessOptions};
pub use outcome::RuleOutcome;
pub use report::{FileReport, FileStatus, RuleRecord, RunSummary};
pub use rules::{RuleParams, RuleSetConfig, RulesConfig, StageConfig, StageKind};
