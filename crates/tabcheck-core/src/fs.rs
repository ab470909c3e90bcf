//! Filesystem-backed table source and sink.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tabcheck_ingest::{
    IngestError, InputLayout, LoadOptions, TableFormat, copy_file, load_table, output_path,
    write_table,
};
use tabcheck_model::ProcessOptions;

use crate::error::PipelineError;
use crate::pipeline::{TableSink, TableSource};

/// Reads CSV and Parquet files from disk.
#[derive(Debug, Clone, Default)]
pub struct FsTableSource {
    options: LoadOptions,
}

impl FsTableSource {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn from_process_options(options: &ProcessOptions) -> Result<Self, IngestError> {
        Ok(Self::new(LoadOptions::from_process_options(options)?))
    }
}

impl TableSource for FsTableSource {
    fn load(&self, path: &Path) -> Result<DataFrame, IngestError> {
        load_table(path, &self.options)
    }
}

/// Writes output tables and pass-through copies under one directory, mirroring each
/// input's path relative to its input root.
///
/// A target is never written twice in one run: a second input that maps to the same
/// target is refused with [`PipelineError::OutputCollision`].
#[derive(Debug, Clone)]
pub struct FsTableSink {
    output_dir: PathBuf,
    format: TableFormat,
    csv_delimiter: char,
    layout: InputLayout,
    claimed: HashMap<PathBuf, PathBuf>,
}

impl FsTableSink {
    pub fn new(output_dir: impl Into<PathBuf>, options: &ProcessOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: options.output_format.into(),
            csv_delimiter: options.csv_delimiter,
            layout: InputLayout::default(),
            claimed: HashMap::new(),
        }
    }

    pub fn with_layout(mut self, layout: InputLayout) -> Self {
        self.layout = layout;
        self
    }

    fn claim(&mut self, target: PathBuf, source: &Path) -> Result<PathBuf, PipelineError> {
        match self.claimed.get(&target) {
            Some(previous) if previous != source => Err(PipelineError::OutputCollision {
                path: target,
                previous: previous.clone(),
            }),
            _ => {
                self.claimed.insert(target.clone(), source.to_path_buf());
                Ok(target)
            }
        }
    }
}

impl TableSink for FsTableSink {
    fn write_table(
        &mut self,
        source: &Path,
        table: &mut DataFrame,
    ) -> Result<PathBuf, PipelineError> {
        let relative = self.layout.relative(source);
        let target = output_path(&self.output_dir, &relative, self.format);
        let target = self.claim(target, source)?;
        write_table(table, &target, self.format, self.csv_delimiter)?;
        Ok(target)
    }

    fn copy_original(&mut self, source: &Path) -> Result<PathBuf, PipelineError> {
        let target = self.output_dir.join(self.layout.relative(source));
        let target = self.claim(target, source)?;
        copy_file(source, &target)?;
        Ok(target)
    }
}
