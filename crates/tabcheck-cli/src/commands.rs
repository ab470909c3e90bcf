use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::Table;
use tabcheck_core::{FsTableSink, FsTableSource, Pipeline, Registry, RulePlan, TableSink};
use tabcheck_ingest::{InputLayout, list_input_files};
use tabcheck_model::{ConfigError, FileReport, RulesConfig};
use tracing::{info, info_span};

use crate::cli::{CheckArgs, RunArgs};
use tabcheck_cli::report::ReportWriter;
use tabcheck_cli::settings::{RunDirs, load_settings, new_run_id};
use tabcheck_cli::summary::apply_table_style;

/// Result of a `run` invocation.
pub struct RunResult {
    pub reports: Vec<FileReport>,
    /// `None` on a dry run.
    pub dirs: Option<RunDirs>,
    pub reports_written: usize,
}

pub fn run_rules() -> Result<()> {
    let registry = Registry::with_builtins();
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Name"]);
    apply_table_style(&mut table);
    let mut validators: Vec<&str> = registry.validator_names().collect();
    validators.sort_unstable();
    let mut transformers: Vec<&str> = registry.transformer_names().collect();
    transformers.sort_unstable();
    for name in validators {
        table.add_row(vec!["validation", name]);
    }
    for name in transformers {
        table.add_row(vec!["transformation", name]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let config = load_settings(&args.config)?;
    let plan = compile(&config)?;

    let mut table = Table::new();
    table.set_header(vec!["Pattern", "Stages"]);
    apply_table_style(&mut table);
    for rule_set in plan.rule_sets() {
        let stages = rule_set
            .stages
            .iter()
            .enumerate()
            .map(|(index, stage)| {
                format!("{index}: {} [{}]", stage.kind(), stage.rule_names().join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![rule_set.pattern.clone(), stages]);
    }
    println!("{table}");
    println!(
        "{} is valid ({} rule sets)",
        args.config.display(),
        plan.rule_sets().len()
    );
    Ok(())
}

pub fn run_process(args: &RunArgs) -> Result<RunResult> {
    let started = Instant::now();
    let config = load_settings(&args.config)?;
    let plan = compile(&config)?;
    let options = plan.options();

    let files = collect_inputs(&args.inputs)?;
    let run_id = args.run_id.clone().unwrap_or_else(new_run_id);
    let span = info_span!("run", run_id = %run_id, dry_run = args.dry_run);
    let _guard = span.enter();
    info!(files = files.len(), rule_sets = plan.rule_sets().len(), "starting run");

    let source = FsTableSource::from_process_options(options)
        .context("configure table loading")?;
    let pipeline = Pipeline::new(&plan);

    let (reports, dirs, reports_written) = if args.dry_run {
        let mut writer = ReportWriter::disabled();
        let reports = pipeline.run(&files, &source, None, &mut writer);
        (reports, None, 0)
    } else {
        let dirs = RunDirs::new(&args.output_dir, &args.report_dir, run_id);
        dirs.create()?;
        let layout = InputLayout::new(args.inputs.iter().cloned());
        let mut sink = FsTableSink::new(&dirs.output, options).with_layout(layout.clone());
        let mut writer = if options.write_reports {
            ReportWriter::new(&dirs.reports).with_layout(layout)
        } else {
            ReportWriter::disabled()
        };
        let reports = pipeline.run(
            &files,
            &source,
            Some(&mut sink as &mut dyn TableSink),
            &mut writer,
        );
        let written = writer.written().len();
        (reports, Some(dirs), written)
    };

    info!(
        files = reports.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );
    Ok(RunResult {
        reports,
        dirs,
        reports_written,
    })
}

fn compile(config: &RulesConfig) -> Result<RulePlan> {
    RulePlan::compile(config, &Registry::with_builtins()).map_err(config_error)
}

fn config_error(error: ConfigError) -> anyhow::Error {
    let lines = error
        .issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow!(
        "invalid rule configuration ({} issues):\n{lines}",
        error.issues.len()
    )
}

/// Expands directories into their files and keeps plain files as given.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = list_input_files(input)
                .with_context(|| format!("list input directory {}", input.display()))?;
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    Ok(files)
}
