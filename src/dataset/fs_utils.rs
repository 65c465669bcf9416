use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

use super::Split;

/// Immediate subdirectories of `root` that are term directories, sorted by name.
///
/// `train/` and `valid/` are never term directories.
pub fn term_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = vec![];
    for entry in fs::read_dir(root).map_err(AppError::at(root))? {
        let entry = entry.map_err(AppError::at(root))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let is_split = entry
            .file_name()
            .to_str()
            .is_some_and(Split::is_split_name);
        if !is_split {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Regular files directly under `dir`, sorted by name so seeded selections are reproducible.
pub fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir).map_err(AppError::at(dir))? {
        let entry = entry.map_err(AppError::at(dir))?;
        let file_type = entry.file_type().map_err(AppError::at(entry.path()))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Rename `from` to `to`, failing instead of replacing anything already at `to`.
///
/// Both paths live under the same destination root, so a plain rename is sufficient.
pub fn move_path(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(AppError::DestinationExists(to.to_path_buf()));
    }
    tracing::debug!("Moving {:?} -> {:?}", from, to);
    fs::rename(from, to).map_err(AppError::at(from))
}
