use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

use super::Split;
use super::fs_utils::term_dirs;

/// Mirror every term directory of `root` as an (initially empty) `root/valid/<term>`.
///
/// Existing directories are left as they are, so this can run any number of times.
/// Returns the validation directories that are now guaranteed to exist.
pub fn scaffold(root: &Path) -> Result<Vec<PathBuf>> {
    let valid_root = Split::Valid.dir(root);
    let mut ensured = vec![];

    for term_dir in term_dirs(root)? {
        let Some(name) = term_dir.file_name() else {
            continue;
        };
        let path = valid_root.join(name);
        tracing::info!("Ensuring existence of directory {:?}", path);
        std::fs::create_dir_all(&path).map_err(AppError::at(&path))?;
        ensured.push(path);
    }

    Ok(ensured)
}
