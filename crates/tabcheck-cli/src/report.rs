//! Per-file report files.
//!
//! Every report is written as JSON. Files that did not end compliant also get a
//! plain-text report listing each rule's messages and a final pass/fail summary.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tabcheck_core::{PipelineError, ReportSink};
use tabcheck_ingest::InputLayout;
use tabcheck_model::{FileReport, FileStatus};
use tracing::debug;

/// Writes reports into a directory, or discards them when disabled.
///
/// Report paths mirror each input's path relative to its input root. When two inputs
/// still map to the same name, later reports get a numeric suffix (`x.csv.2.report.json`).
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: Option<PathBuf>,
    layout: InputLayout,
    used: HashSet<PathBuf>,
    written: Vec<PathBuf>,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            layout: InputLayout::default(),
            used: HashSet::new(),
            written: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            dir: None,
            layout: InputLayout::default(),
            used: HashSet::new(),
            written: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: InputLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Unused base path (without the `.report.*` suffix) for `file` inside `dir`.
    fn claim_base(&mut self, dir: &Path, file: &Path) -> PathBuf {
        let base = dir.join(self.layout.relative(file));
        let mut candidate = base.clone();
        let mut n = 1;
        while !self.used.insert(candidate.clone()) {
            n += 1;
            let mut name = base.clone().into_os_string();
            name.push(format!(".{n}"));
            candidate = PathBuf::from(name);
        }
        candidate
    }

    /// Paths of every report file written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_file(&mut self, path: PathBuf, contents: &str) -> Result<(), PipelineError> {
        fs::write(&path, contents).map_err(|e| PipelineError::Report {
            path: path.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "wrote report");
        self.written.push(path);
        Ok(())
    }
}

impl ReportSink for ReportWriter {
    fn write_report(&mut self, report: &FileReport) -> Result<(), PipelineError> {
        let Some(dir) = self.dir.clone() else {
            return Ok(());
        };
        let report_error = |message: String| PipelineError::Report {
            path: report.file.clone(),
            message,
        };
        let base = self.claim_base(&dir, &report.file);
        if let Some(parent) = base.parent() {
            fs::create_dir_all(parent).map_err(|e| report_error(e.to_string()))?;
        }
        let with_suffix = |suffix: &str| {
            let mut name = base.clone().into_os_string();
            name.push(suffix);
            PathBuf::from(name)
        };

        let json = serde_json::to_string_pretty(report).map_err(|e| report_error(e.to_string()))?;
        self.write_file(with_suffix(".report.json"), &json)?;

        if !report.is_compliant() {
            self.write_file(with_suffix(".report.txt"), &render_text(report))?;
        }
        Ok(())
    }
}

/// Human-readable rendering of one report.
pub fn render_text(report: &FileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", display_path(&report.file));
    let _ = writeln!(
        out,
        "Rule set: {}",
        report.rule_set.as_deref().unwrap_or("(none)")
    );
    let _ = writeln!(out, "Status: {}", report.status.as_str());
    if let Some(error) = &report.error {
        let _ = writeln!(out, "Error: {error}");
    }

    if report.status == FileStatus::Unvalidated {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "No rule set matched this file; it was passed through unchanged."
        );
        return out;
    }

    let mut current_stage = None;
    for record in &report.records {
        if current_stage != Some(record.stage_index) {
            current_stage = Some(record.stage_index);
            let _ = writeln!(out);
            let _ = writeln!(out, "Stage {} ({})", record.stage_index, record.stage_kind);
        }
        let mark = if record.success { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "  [{mark}] {}", record.rule);
        for message in &record.messages {
            let _ = writeln!(out, "    - {message}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "------ VALIDATION RESULTS -------");
    for record in report.validation_records() {
        let verdict = if record.success { "Passed" } else { "Failed" };
        let _ = writeln!(out, "{}: {verdict}", record.rule);
    }
    out
}

fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
