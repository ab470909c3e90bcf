//! Process-wide options shared by loaders, checks and writers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Format used when a transformed table has to be written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    #[default]
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            other => Err(format!("unsupported output format '{other}'")),
        }
    }
}

/// Options for processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Field delimiter for CSV input and output.
    pub csv_delimiter: char,

    /// Tokens treated as null when a rule does not configure its own.
    pub null_tokens: Vec<String>,

    /// Format for transformed output tables.
    pub output_format: OutputFormat,

    /// Whether report files are written at all.
    pub write_reports: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            csv_delimiter: ';',
            null_tokens: vec![String::new()],
            output_format: OutputFormat::default(),
            write_reports: true,
        }
    }
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_csv_delimiter(mut self, delimiter: char) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_null_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}
