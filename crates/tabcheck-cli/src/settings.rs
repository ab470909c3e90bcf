//! Rule file loading, environment overrides and per-run directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tabcheck_model::{OutputFormat, ProcessOptions, RulesConfig};

pub const ENV_CSV_DELIMITER: &str = "TABCHECK_CSV_DELIMITER";
pub const ENV_OUTPUT_FORMAT: &str = "TABCHECK_OUTPUT_FORMAT";
pub const ENV_NULL_TOKENS: &str = "TABCHECK_NULL_TOKENS";
pub const ENV_WRITE_REPORTS: &str = "TABCHECK_WRITE_REPORTS";

/// Read and parse a TOML rule file.
pub fn load_rules(path: &Path) -> Result<RulesConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read rule file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse rule file {}", path.display()))
}

/// Load a rule file and apply overrides from the process environment.
///
/// A `.env` file in the working directory is read first, if present.
pub fn load_settings(path: &Path) -> Result<RulesConfig> {
    dotenvy::dotenv().ok();
    let mut config = load_rules(path)?;
    apply_overrides(&mut config.options, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Apply `TABCHECK_*` overrides found through `lookup`.
pub fn apply_overrides<F>(options: &mut ProcessOptions, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_CSV_DELIMITER) {
        let mut chars = value.chars();
        options.csv_delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => bail!("{ENV_CSV_DELIMITER} must be a single character, got '{value}'"),
        };
    }
    if let Some(value) = lookup(ENV_OUTPUT_FORMAT) {
        options.output_format = value
            .parse::<OutputFormat>()
            .map_err(|e| anyhow!("{ENV_OUTPUT_FORMAT}: {e}"))?;
    }
    if let Some(value) = lookup(ENV_NULL_TOKENS) {
        options.null_tokens = value.split(',').map(str::to_string).collect();
    }
    if let Some(value) = lookup(ENV_WRITE_REPORTS) {
        options.write_reports = parse_flag(&value)
            .ok_or_else(|| anyhow!("{ENV_WRITE_REPORTS}: expected true or false, got '{value}'"))?;
    }
    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Identifier for one run: the UTC start time as `YYYYmmdd_HHMMSS`.
pub fn new_run_id() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Where a run writes its output tables and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirs {
    pub run_id: String,
    pub output: PathBuf,
    pub reports: PathBuf,
}

impl RunDirs {
    pub fn new(output_root: &Path, report_root: &Path, run_id: impl Into<String>) -> Self {
        let run_id = run_id.into();
        Self {
            output: output_root.join(&run_id),
            reports: report_root.join(&run_id),
            run_id,
        }
    }

    pub fn create(&self) -> Result<()> {
        for dir in [&self.output, &self.reports] {
            fs::create_dir_all(dir)
                .with_context(|| format!("create directory {}", dir.display()))?;
        }
        Ok(())
    }
}
