//! Per-file orchestration.
//!
//! Each file moves through `Pending → Matching → Running(stage) → Completed | Errored`.
//! Validation stages never stop the pipeline; a failing transformation stage ends the
//! file as errored with no output.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tabcheck_ingest::IngestError;
use tabcheck_model::{FileReport, FileStatus, StageKind};
use tracing::{debug, error, info, info_span, trace, warn};

use crate::error::PipelineError;
use crate::plan::RulePlan;
use crate::stage::StageRunner;

/// Loads the table for a file.
pub trait TableSource {
    fn load(&self, path: &Path) -> Result<DataFrame, IngestError>;
}

/// Receives output for files that end compliant or unvalidated.
pub trait TableSink {
    /// Persist a transformed table. Returns where it was written.
    fn write_table(&mut self, source: &Path, table: &mut DataFrame)
    -> Result<PathBuf, PipelineError>;

    /// Pass the original file through unchanged. Returns where it was written.
    fn copy_original(&mut self, source: &Path) -> Result<PathBuf, PipelineError>;
}

/// Receives one report per processed file.
pub trait ReportSink {
    fn write_report(&mut self, report: &FileReport) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Pending,
    Matching,
    Running { stage: usize },
    Completed,
    Errored,
}

/// What should be emitted for a file.
#[derive(Debug, Clone)]
pub enum FileOutput {
    /// Non-compliant or errored: nothing is written.
    None,
    /// Unvalidated, or compliant without any transformation: copy the input as is.
    Original,
    /// Compliant after transformation.
    Table(DataFrame),
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub state: FileState,
    pub report: FileReport,
    pub output: FileOutput,
}

/// Drives files through a compiled [`RulePlan`].
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    plan: &'a RulePlan,
}

struct Progress {
    state: FileState,
}

impl Progress {
    fn advance(&mut self, next: FileState) {
        trace!(from = ?self.state, to = ?next, "file state");
        self.state = next;
    }
}

impl<'a> Pipeline<'a> {
    pub fn new(plan: &'a RulePlan) -> Self {
        Self { plan }
    }

    /// Process one file without writing anything.
    pub fn process_file(&self, path: &Path, source: &dyn TableSource) -> FileOutcome {
        let span = info_span!("file", path = %path.display());
        let _guard = span.enter();
        let mut progress = Progress {
            state: FileState::Pending,
        };

        progress.advance(FileState::Matching);
        let Some(rule_set) = self.plan.resolve(path) else {
            progress.advance(FileState::Completed);
            info!("no rule set matched; passing through");
            return FileOutcome {
                state: progress.state,
                report: FileReport::unvalidated(path),
                output: FileOutput::Original,
            };
        };
        debug!(pattern = %rule_set.pattern, "matched rule set");

        let mut report = FileReport::new(path);
        report.rule_set = Some(rule_set.pattern.clone());

        let mut table = match source.load(path) {
            Ok(table) => table,
            Err(e) => {
                progress.advance(FileState::Errored);
                error!(error = %e, "failed to load table");
                report.status = FileStatus::Errored;
                report.error = Some(e.to_string());
                return FileOutcome {
                    state: progress.state,
                    report,
                    output: FileOutput::None,
                };
            }
        };

        let mut transformed = false;
        for (index, stage) in rule_set.stages.iter().enumerate() {
            progress.advance(FileState::Running { stage: index });
            info!(stage = index, kind = %stage.kind(), rules = stage.len(), "running stage");
            let result = StageRunner::new(index, stage).run(table);
            report.records.extend(result.records);
            table = result.table;
            transformed |= result.transformed;

            if stage.kind() == StageKind::Transformation && !result.success {
                progress.advance(FileState::Errored);
                let detail = report
                    .records
                    .last()
                    .map(|r| format!("rule '{}' failed: {}", r.rule, r.messages.join("; ")))
                    .unwrap_or_default();
                error!(stage = index, %detail, "transformation stage aborted");
                report.status = FileStatus::Errored;
                report.aborted_stage = Some(index);
                report.error = Some(format!("transformation stage {index} aborted: {detail}"));
                return FileOutcome {
                    state: progress.state,
                    report,
                    output: FileOutput::None,
                };
            }
        }

        progress.advance(FileState::Completed);
        let compliant = report.validations_passed();
        report.status = if compliant {
            FileStatus::Compliant
        } else {
            FileStatus::NonCompliant
        };
        info!(status = report.status.as_str(), "file processed");

        let output = match (compliant, transformed) {
            (false, _) => FileOutput::None,
            (true, true) => FileOutput::Table(table),
            (true, false) => FileOutput::Original,
        };
        FileOutcome {
            state: progress.state,
            report,
            output,
        }
    }

    /// Process every file in order, writing output (unless `tables` is `None`) and
    /// reports as each file completes.
    ///
    /// Sink failures are logged and never stop the run. A failed output write turns the
    /// file's report into an errored one.
    pub fn run(
        &self,
        files: &[PathBuf],
        source: &dyn TableSource,
        mut tables: Option<&mut dyn TableSink>,
        reports: &mut dyn ReportSink,
    ) -> Vec<FileReport> {
        let mut finished = Vec::with_capacity(files.len());
        for path in files {
            let FileOutcome {
                mut report, output, ..
            } = self.process_file(path, source);

            if let Some(sink) = tables.as_deref_mut() {
                let written = match output {
                    FileOutput::None => Ok(None),
                    FileOutput::Original => sink.copy_original(path).map(Some),
                    FileOutput::Table(mut table) => sink.write_table(path, &mut table).map(Some),
                };
                match written {
                    Ok(Some(target)) => debug!(
                        file = %path.display(),
                        target = %target.display(),
                        "wrote output"
                    ),
                    Ok(None) => {}
                    Err(e) => {
                        error!(file = %path.display(), error = %e, "failed to write output");
                        report.status = FileStatus::Errored;
                        report.error = Some(format!("failed to write output: {e}"));
                    }
                }
            }

            if let Err(e) = reports.write_report(&report) {
                warn!(file = %path.display(), error = %e, "failed to write report");
            }
            finished.push(report);
        }
        finished
    }
}
