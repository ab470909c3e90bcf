//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists every regular file below `dir`, recursively.
///
/// Files of any extension are returned so that unsupported inputs still get a report.
/// Hidden entries (names starting with `.`) are skipped. The result is sorted by path.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));
        if hidden {
            continue;
        }
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Names input files by their path below the input root they were found under.
///
/// Outputs and reports mirror these relative paths, so `a/x.csv` and `b/x.csv` found under
/// the same root never share a target. A file given directly as an input root, or lying
/// outside every root, is named by its file name alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLayout {
    roots: Vec<PathBuf>,
}

impl InputLayout {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of `file` relative to the closest enclosing root.
    pub fn relative(&self, file: &Path) -> PathBuf {
        self.roots
            .iter()
            .filter_map(|root| file.strip_prefix(root).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .min_by_key(|rel| rel.components().count())
            .map(Path::to_path_buf)
            .or_else(|| file.file_name().map(PathBuf::from))
            .unwrap_or_else(|| file.to_path_buf())
    }
}
