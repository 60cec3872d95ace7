use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Recursively list files under `root` with the given extension, sorted.
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, &mut |path| {
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            found.push(path.to_path_buf());
        }
    })?;
    found.sort();
    Ok(found)
}

/// Recursively list the CSV files under `root`, skipping any file whose
/// name ends with one of `exclude_suffixes`.
pub fn collect_csv_files(root: &Path, exclude_suffixes: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = find_files(root, "csv")?;
    files.retain(|path| !is_excluded(path, exclude_suffixes));
    Ok(files)
}

pub fn is_excluded(path: &Path, exclude_suffixes: &[String]) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return true,
    };
    exclude_suffixes
        .iter()
        .any(|suffix| name.ends_with(suffix.as_str()))
}

fn walk(dir: &Path, visit: &mut dyn FnMut(&Path)) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, visit)?;
        } else if path.is_file() {
            visit(&path);
        }
    }
    Ok(())
}
