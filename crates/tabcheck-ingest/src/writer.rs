//! Output materialization.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::loader::{TableFormat, delimiter_byte};

/// Output location for an input with relative path `relative` inside `output_dir`,
/// keeping its sub-directories and switching the extension to `format`.
pub fn output_path(output_dir: &Path, relative: &Path, format: TableFormat) -> PathBuf {
    let ext = match format {
        TableFormat::Csv => "csv",
        TableFormat::Parquet => "parquet",
    };
    output_dir.join(relative).with_extension(ext)
}

/// Write `df` to `path` in the given format, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_table(
    df: &mut DataFrame,
    path: &Path,
    format: TableFormat,
    csv_delimiter: char,
) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|source| IngestError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let written = match format {
        TableFormat::Parquet => ParquetWriter::new(file).finish(df).map(|_| ()),
        TableFormat::Csv => CsvWriter::new(file)
            .include_header(true)
            .with_separator(delimiter_byte(csv_delimiter)?)
            .finish(df),
    };
    written.map_err(|e| IngestError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

/// Copy `source` byte-for-byte to `target`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the copy fails.
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_parent(target)?;
    fs::copy(source, target).map_err(|source_err| IngestError::File {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    debug!(from = %source.display(), to = %target.display(), "copied file");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| IngestError::File {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
