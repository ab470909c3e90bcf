//! Per-file reports produced by the pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::rules::StageKind;

/// Final state of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// No rule set matched; the file passes through untouched.
    Unvalidated,
    /// Every validation rule passed and no transformation failed.
    Compliant,
    /// At least one validation rule failed.
    NonCompliant,
    /// The file could not be loaded or a transformation stage aborted.
    Errored,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::Compliant => "compliant",
            Self::NonCompliant => "non-compliant",
            Self::Errored => "errored",
        }
    }
}

/// Outcome of one rule invocation inside a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub stage_index: usize,
    pub stage_kind: StageKind,
    pub rule: String,
    pub success: bool,
    pub messages: Vec<String>,
}

/// Report for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: PathBuf,
    /// Pattern of the rule set that matched, if any.
    pub rule_set: Option<String>,
    pub status: FileStatus,
    pub records: Vec<RuleRecord>,
    /// Index of the transformation stage that aborted the pipeline.
    pub aborted_stage: Option<usize>,
    /// Loader or pipeline error that ended processing.
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            rule_set: None,
            status: FileStatus::Unvalidated,
            records: Vec::new(),
            aborted_stage: None,
            error: None,
        }
    }

    pub fn unvalidated(file: impl Into<PathBuf>) -> Self {
        Self::new(file)
    }

    pub fn errored(file: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Errored,
            error: Some(error.into()),
            ..Self::new(file)
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.status == FileStatus::Compliant
    }

    /// Records from validation stages only.
    pub fn validation_records(&self) -> impl Iterator<Item = &RuleRecord> {
        self.records
            .iter()
            .filter(|record| record.stage_kind == StageKind::Validation)
    }

    /// Records of rules that did not succeed, in execution order.
    pub fn failed_records(&self) -> impl Iterator<Item = &RuleRecord> {
        self.records.iter().filter(|record| !record.success)
    }

    /// Logical AND over all validation outcomes (vacuously true).
    pub fn validations_passed(&self) -> bool {
        self.validation_records().all(|record| record.success)
    }

    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// Counts per status across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub errored: usize,
    pub unvalidated: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &FileReport) {
        self.files += 1;
        match report.status {
            FileStatus::Compliant => self.compliant += 1,
            FileStatus::NonCompliant => self.non_compliant += 1,
            FileStatus::Errored => self.errored += 1,
            FileStatus::Unvalidated => self.unvalidated += 1,
        }
    }

    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a FileReport>) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.record(report);
        }
        summary
    }
}
