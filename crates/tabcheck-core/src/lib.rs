//! The tabcheck engine.
//!
//! [`RulePlan::compile`] turns a [`RulesConfig`](tabcheck_model::RulesConfig) into an
//! immutable plan using the rules known to a [`Registry`]. A [`Pipeline`] then drives each
//! file through matching and its stages, handing reports and output tables to the sinks.

pub mod error;
pub mod fs;
pub mod matcher;
pub mod pipeline;
pub mod plan;
pub mod registry;
pub mod stage;

pub use error::{DispatchError, PipelineError};
pub use fs::{FsTableSink, FsTableSource};
pub use matcher::{PatternMatcher, glob_match, literal_prefix_len};
pub use pipeline::{
    FileOutcome, FileOutput, FileState, Pipeline, ReportSink, TableSink, TableSource,
};
pub use plan::{CompiledRuleSet, CompiledStage, RulePlan};
pub use registry::{Registry, RegistryBuilder, TransformerFactory, ValidatorFactory};
pub use stage::{StageResult, StageRunner};
