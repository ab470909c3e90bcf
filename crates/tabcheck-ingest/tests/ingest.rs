//! Tests for discovery, loading and writing.

use std::fs;
use std::path::Path;

use polars::prelude::*;
use tabcheck_ingest::{
    IngestError, LoadOptions, TableFormat, copy_file, list_input_files, load_table, output_path,
    write_table,
};

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

#[test]
fn lists_files_recursively_and_sorted() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "b.csv", "A\n1\n");
    write(dir.path(), "a.parquet", "");
    write(dir.path(), "nested/c.txt", "hello");
    write(dir.path(), ".hidden.csv", "A\n1\n");

    let files = list_input_files(dir.path()).expect("list files");
    let names: Vec<String> = files
        .iter()
        .map(|path| {
            path.strip_prefix(dir.path())
                .expect("under temp dir")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(names, vec!["a.parquet", "b.csv", "nested/c.txt"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = list_input_files(&dir.path().join("nope"));
    assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
}

#[test]
fn loads_csv_with_configured_delimiter() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "sales.csv", "Region;Revenue\nNorth;10\nSouth;\n");

    let df = load_table(&dir.path().join("sales.csv"), &LoadOptions::default()).expect("load");
    assert_eq!(df.height(), 2);
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Region", "Revenue"]);
    let revenue = df.column("Revenue").expect("Revenue column");
    assert_eq!(revenue.null_count(), 1);
}

#[test]
fn rejects_unsupported_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "notes.txt", "hello");
    let result = load_table(&dir.path().join("notes.txt"), &LoadOptions::default());
    assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
}

#[test]
fn parquet_round_trip_preserves_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut df = df![
        "Id" => [1i64, 2, 3],
        "Category" => ["A", "A", "B"],
    ]
    .expect("build frame");
    let path = output_path(dir.path(), Path::new("items.csv"), TableFormat::Parquet);
    write_table(&mut df, &path, TableFormat::Parquet, ';').expect("write parquet");

    let loaded = load_table(&path, &LoadOptions::default()).expect("load parquet");
    assert!(loaded.equals(&df));
}

#[test]
fn copy_is_byte_identical() {
    let dir = tempfile::tempdir().expect("temp dir");
    let content = "A;B\n 1 ;x\n\n";
    write(dir.path(), "raw.csv", content);
    let target = dir.path().join("out/nested/raw.csv");
    copy_file(&dir.path().join("raw.csv"), &target).expect("copy");
    assert_eq!(fs::read_to_string(target).expect("read copy"), content);
}
