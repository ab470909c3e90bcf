//! CSV and Parquet loading.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use tabcheck_model::{OutputFormat, ProcessOptions};

use crate::error::{IngestError, Result};

/// Rows sampled by the CSV reader to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Supported on-disk table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|ext| ext.to_str())?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("parquet") {
            Some(Self::Parquet)
        } else {
            None
        }
    }
}

impl From<OutputFormat> for TableFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Parquet => Self::Parquet,
        }
    }
}

/// Options for reading input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub csv_delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            csv_delimiter: b';',
        }
    }
}

impl LoadOptions {
    /// Derive load options from process options.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidDelimiter`] for non-ASCII delimiters.
    pub fn from_process_options(options: &ProcessOptions) -> Result<Self> {
        Ok(Self {
            csv_delimiter: delimiter_byte(options.csv_delimiter)?,
        })
    }
}

pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IngestError::InvalidDelimiter { delimiter })
}

/// Reads a CSV or Parquet file into a `DataFrame`.
///
/// Empty CSV fields become native nulls; no other value is rewritten.
///
/// # Errors
///
/// Returns an error for unsupported extensions, unreadable files and parse failures.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let format = TableFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let df = match format {
        TableFormat::Csv => read_csv(path, options.csv_delimiter)?,
        TableFormat::Parquet => read_parquet(path)?,
    };
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

fn read_csv(path: &Path, delimiter: u8) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(CsvParseOptions::default().with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| IngestError::File {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
