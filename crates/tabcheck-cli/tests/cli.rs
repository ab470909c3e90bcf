//! Runs the `tabcheck` binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use polars::prelude::AnyValue;
use tabcheck_ingest::{LoadOptions, load_table};

const RULES: &str = r#"
[options]
csv_delimiter = ";"
null_tokens = ["", "NA"]
output_format = "parquet"

[[rule_sets]]
pattern = "sales_*.csv"

[[rule_sets.stages]]
kind = "transformation"
rules.derive_column = { target = "Price", formula = "Revenue / Units" }

[[rule_sets.stages]]
kind = "validation"
rules.required_columns = ["Region", "Revenue", "Units", "Price"]

[[rule_sets]]
pattern = "stock_*.csv"

[[rule_sets.stages]]
kind = "validation"
rules.value_range = { Level = { min = 0 } }
"#;

fn tabcheck(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tabcheck"));
    for key in [
        "TABCHECK_CSV_DELIMITER",
        "TABCHECK_OUTPUT_FORMAT",
        "TABCHECK_NULL_TOKENS",
        "TABCHECK_WRITE_REPORTS",
        "RUST_LOG",
    ] {
        command.env_remove(key);
    }
    command
        .current_dir(dir)
        .args(["--color", "never"])
        .args(args)
        .output()
        .expect("run tabcheck")
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("rules.toml"), RULES).expect("write rules");
    let input = dir.path().join("input");
    fs::create_dir_all(&input).expect("create input dir");
    fs::write(input.join("sales_1.csv"), "Region;Revenue;Units\nNorth;120;4\n").expect("write");
    fs::write(input.join("stock_1.csv"), "Item;Level\nA;3\nB;-1\n").expect("write");
    fs::write(input.join("readme.md"), "# notes\n").expect("write");
    dir
}

#[test]
fn run_writes_outputs_and_reports_under_run_id() {
    let dir = setup();
    let output = tabcheck(
        dir.path(),
        &["run", "--config", "rules.toml", "--run-id", "r1", "input"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 ok / 1 failed / 0 errored / 1 unvalidated"), "{stdout}");

    let out = dir.path().join("output/r1");
    let table = load_table(&out.join("sales_1.parquet"), &LoadOptions::default()).expect("load");
    let price = table.column("Price").expect("Price column");
    assert_eq!(price.get(0).expect("row 0"), AnyValue::Float64(30.0));
    assert_eq!(
        fs::read_to_string(out.join("readme.md")).expect("copied original"),
        "# notes\n"
    );
    assert!(!out.join("stock_1.parquet").exists());
    assert!(!out.join("stock_1.csv").exists());

    let reports = dir.path().join("reports/r1");
    assert!(reports.join("sales_1.csv.report.json").is_file());
    assert!(!reports.join("sales_1.csv.report.txt").exists());
    let text = fs::read_to_string(reports.join("stock_1.csv.report.txt")).expect("text report");
    assert!(text.contains("Column Level has 1 values below minimum 0"), "{text}");
}

#[test]
fn nested_inputs_keep_their_relative_paths() {
    let dir = setup();
    for (sub, content) in [("a", "A\n1\n"), ("b", "A\n2\n")] {
        let nested = dir.path().join("input").join(sub);
        fs::create_dir_all(&nested).expect("create nested dir");
        fs::write(nested.join("x.txt"), content).expect("write");
    }
    let output = tabcheck(
        dir.path(),
        &["run", "-c", "rules.toml", "--run-id", "r2", "input"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let out = dir.path().join("output/r2");
    assert_eq!(fs::read_to_string(out.join("a/x.txt")).expect("a copy"), "A\n1\n");
    assert_eq!(fs::read_to_string(out.join("b/x.txt")).expect("b copy"), "A\n2\n");
    let reports = dir.path().join("reports/r2");
    assert!(reports.join("a/x.txt.report.json").is_file());
    assert!(reports.join("b/x.txt.report.json").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = setup();
    let output = tabcheck(dir.path(), &["run", "-c", "rules.toml", "--dry-run", "input"]);
    assert!(output.status.success());
    assert!(!dir.path().join("output").exists());
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn check_reports_every_config_issue() {
    let dir = tempfile::tempdir().expect("temp dir");
    let rules = r#"
[[rule_sets]]
pattern = "*.csv"

[[rule_sets.stages]]
kind = "validation"
rules.no_such_rule = true
rules.value_range = "oops"
"#;
    fs::write(dir.path().join("rules.toml"), rules).expect("write rules");

    let output = tabcheck(dir.path(), &["check", "--config", "rules.toml"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 issues"), "{stderr}");
    assert!(stderr.contains("no_such_rule"), "{stderr}");
    assert!(stderr.contains("value_range"), "{stderr}");
}

#[test]
fn check_accepts_a_valid_file() {
    let dir = setup();
    let output = tabcheck(dir.path(), &["check", "-c", "rules.toml"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sales_*.csv"), "{stdout}");
    assert!(stdout.contains("(2 rule sets)"), "{stdout}");
}

#[test]
fn rules_lists_builtins() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = tabcheck(dir.path(), &["rules"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["required_columns", "value_range", "derive_column", "rename_columns"] {
        assert!(stdout.contains(name), "missing {name} in {stdout}");
    }
}

#[test]
fn missing_input_is_an_error() {
    let dir = setup();
    let output = tabcheck(dir.path(), &["run", "-c", "rules.toml", "nope"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("input not found"));
}
