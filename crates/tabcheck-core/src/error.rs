use std::path::PathBuf;

use tabcheck_ingest::IngestError;
use tabcheck_model::{ParamError, StageKind};
use tabcheck_transform::TransformFailure;
use thiserror::Error;

/// Errors from invoking a rule by name outside a compiled plan.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown {kind} rule '{name}'")]
    UnknownRule { kind: StageKind, name: String },

    #[error("rule '{rule}': {source}")]
    InvalidParams {
        rule: String,
        #[source]
        source: ParamError,
    },

    #[error("transformation failed: {0}")]
    Transform(#[from] TransformFailure),
}

/// Errors raised by the sinks a pipeline writes to.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("output {path} was already written for {previous}")]
    OutputCollision { path: PathBuf, previous: PathBuf },

    #[error("failed to write report for {path}: {message}")]
    Report { path: PathBuf, message: String },
}
