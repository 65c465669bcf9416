use std::path::Path;

use crate::error::{AppError, Result};
use crate::sampler::Selector;
use crate::terms::SearchTerm;

use super::Split;
use super::fs_utils::{files_in, move_path};

/// Per-term result of a partition run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub term: SearchTerm,
    /// Validated files found in the term directory
    pub total: usize,
    /// Files moved to `valid/<term>`
    pub valid: usize,
    /// Files left in the directory that became `train/<term>`
    pub train: usize,
}

/// Number of files that go to the validation split: `floor(n * valid_pct / 100)`.
///
/// Truncation is deliberate and never rounds up, so small terms may get zero.
pub fn validation_count(n: usize, valid_pct: u8) -> usize {
    n * usize::from(valid_pct) / 100
}

/// Move a random `valid_pct` share of each term's files into `root/valid/<term>`, then move
/// the rest of the term directory to `root/train/<term>`.
///
/// Terms are processed in the given order. `root/valid/<term>` must already exist (see
/// [`scaffold`](super::scaffold)).
///
/// Moves are not transactional. If an error stops the run, terms already processed stay
/// partitioned and the failing term may have some files in `valid/<term>` while the rest are
/// still in `root/<term>`.
///
/// # Errors
///
/// - `AppError::InvalidPercentage` if `valid_pct > 100`
/// - `AppError::MissingTermDirectory` if a term has no directory under `root`
/// - `AppError::DestinationExists` if a move would replace an existing file or directory
/// - `AppError::PathIo` for any failed filesystem operation
pub fn partition(
    root: &Path,
    terms: &[SearchTerm],
    valid_pct: u8,
    selector: &mut dyn Selector,
) -> Result<Vec<PartitionSummary>> {
    if valid_pct > 100 {
        return Err(AppError::InvalidPercentage(valid_pct));
    }

    tracing::info!(
        "Search term list: {:?}",
        terms.iter().map(SearchTerm::as_str).collect::<Vec<_>>()
    );

    terms
        .iter()
        .map(|term| partition_term(root, term, valid_pct, selector))
        .collect()
}

fn partition_term(
    root: &Path,
    term: &SearchTerm,
    valid_pct: u8,
    selector: &mut dyn Selector,
) -> Result<PartitionSummary> {
    let term_dir = root.join(term);
    if !term_dir.is_dir() {
        return Err(AppError::MissingTermDirectory {
            term: term.to_string(),
            path: term_dir,
        });
    }

    let files = files_in(&term_dir)?;
    let total = files.len();
    let mut k = validation_count(total, valid_pct);

    if k < 1 {
        tracing::warn!(
            "Validation split for {:?} rounds down to zero files ({} files at {}%), \
             increase the validation percentage; keeping every file for training",
            term.as_str(),
            total,
            valid_pct
        );
        k = 0;
    } else {
        let valid_dir = Split::Valid.term_dir(root, term);
        if !valid_dir.is_dir() {
            return Err(AppError::Config(format!(
                "validation directory {:?} is missing, scaffold {:?} before partitioning",
                valid_dir, root
            )));
        }

        for file in selector.select(&files, k) {
            let Some(name) = file.file_name() else {
                continue;
            };
            move_path(&file, &valid_dir.join(name))?;
        }
    }

    let train_root = Split::Train.dir(root);
    std::fs::create_dir_all(&train_root).map_err(AppError::at(&train_root))?;
    let train_dir = train_root.join(term);
    tracing::info!("Moving {:?} to {:?}", term_dir, train_dir);
    move_path(&term_dir, &train_dir)?;

    Ok(PartitionSummary {
        term: term.clone(),
        total,
        valid: k,
        train: total - k,
    })
}
