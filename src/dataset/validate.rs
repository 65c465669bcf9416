use image::error::UnsupportedErrorKind;
use image::{ImageError, ImageReader};
use indicatif::{ProgressFinish, ProgressIterator};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::progress_bar::progress_bar_style;

use super::fs_utils::{files_in, term_dirs};

/// Outcome of validating one term directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermValidation {
    pub term_dir: PathBuf,
    pub kept: usize,
    /// Kept without a full decode, e.g. images over the decoder's allocation limit
    pub unverified: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub terms: Vec<TermValidation>,
}

impl ValidationReport {
    pub fn total_kept(&self) -> usize {
        self.terms.iter().map(|t| t.kept).sum()
    }

    pub fn total_unverified(&self) -> usize {
        self.terms.iter().map(|t| t.unverified).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.terms.iter().map(|t| t.removed).sum()
    }
}

/// Delete every file under the term directories of `root` that does not decode as an image.
///
/// Only a decode failure or an unrecognised format removes the file. Images the decoder
/// refuses for other reasons (allocation limits, unsupported color types) are kept and
/// reported. Any other I/O error (permissions, a file vanishing mid-run) aborts validation
/// with the offending path.
pub fn validate_assets(root: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    for term_dir in term_dirs(root)? {
        tracing::info!("Validating images in {:?}", term_dir);
        let files = files_in(&term_dir)?;
        let mut kept = 0;
        let mut unverified = 0;
        let mut removed = 0;

        let label = term_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        for path in files
            .iter()
            .progress_with_style(progress_bar_style())
            .with_message(format!("Validating {label}"))
            .with_finish(ProgressFinish::AndLeave)
        {
            tracing::debug!("Checking {:?}", path);
            match check_image(path)? {
                Verdict::Decodes => kept += 1,
                Verdict::Unverified(reason) => {
                    tracing::warn!(
                        "Image {:?} could not be fully decoded ({}), keeping it unverified",
                        path,
                        reason
                    );
                    kept += 1;
                    unverified += 1;
                }
                Verdict::Undecodable(reason) => {
                    tracing::info!(
                        "Image {:?} cannot be identified as an image ({}), deleting",
                        path,
                        reason
                    );
                    std::fs::remove_file(path).map_err(AppError::at(path))?;
                    removed += 1;
                }
            }
        }

        report.terms.push(TermValidation {
            term_dir,
            kept,
            unverified,
            removed,
        });
    }

    Ok(report)
}

enum Verdict {
    Decodes,
    /// Not an image as far as any enabled decoder can tell
    Undecodable(ImageError),
    /// Recognised but not decoded, so not known to be corrupt
    Unverified(ImageError),
}

/// Fully decode `path` and classify the outcome.
///
/// The file handle and decoded buffer are dropped before returning.
fn check_image(path: &Path) -> Result<Verdict> {
    let reader = ImageReader::open(path)
        .map_err(AppError::at(path))?
        .with_guessed_format()
        .map_err(AppError::at(path))?;

    let err = match reader.decode() {
        Ok(_) => return Ok(Verdict::Decodes),
        Err(err) => err,
    };

    match err {
        ImageError::IoError(e)
            if !matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::InvalidData) =>
        {
            Err(AppError::PathIo {
                path: path.to_path_buf(),
                source: e,
            })
        }
        err if is_undecodable(&err) => Ok(Verdict::Undecodable(err)),
        err => Ok(Verdict::Unverified(err)),
    }
}

fn is_undecodable(err: &ImageError) -> bool {
    match err {
        ImageError::Decoding(_) => true,
        ImageError::Unsupported(e) => matches!(e.kind(), UnsupportedErrorKind::Format(_)),
        // Truncated or garbled streams surface as I/O errors from some decoders
        ImageError::IoError(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_utils::{file_names, populate, write_corrupt, write_png};
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_removes_only_undecodable_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let cats = populate(root, "cats", 3, 2);
        let dogs = populate(root, "dogs", 1, 0);

        let report = validate_assets(root).unwrap();

        assert_eq!(file_names(&cats).len(), 3);
        assert!(file_names(&cats).iter().all(|n| !n.contains("broken")));
        assert_eq!(file_names(&dogs).len(), 1);
        assert_eq!(report.total_kept(), 4);
        assert_eq!(report.total_removed(), 2);
        assert_eq!(
            report.terms[0],
            TermValidation {
                term_dir: cats,
                kept: 3,
                unverified: 0,
                removed: 2
            }
        );
    }

    #[test]
    fn test_keeps_images_over_the_allocation_limit() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let dir = populate(root, "maps", 1, 0);
        // farbfeld header declaring 20000x20000 RGBA16 (3.2 GB decoded), rejected by the
        // decoder's default allocation limit before any pixel is read
        let mut header = b"farbfeld".to_vec();
        header.extend_from_slice(&20_000u32.to_be_bytes());
        header.extend_from_slice(&20_000u32.to_be_bytes());
        fs::write(dir.join("huge.ff"), header).unwrap();

        let report = validate_assets(root).unwrap();

        assert!(dir.join("huge.ff").exists());
        assert_eq!(file_names(&dir).len(), 2);
        assert_eq!(report.total_removed(), 0);
        assert_eq!(report.total_unverified(), 1);
        assert_eq!(report.total_kept(), 2);
    }

    #[test]
    fn test_extension_does_not_matter() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let dir = root.join("birds");
        fs::create_dir(&dir).unwrap();
        // valid PNG bytes behind a misleading name, and an empty download
        write_png(&dir.join("real.png"));
        fs::rename(dir.join("real.png"), dir.join("real")).unwrap();
        fs::write(dir.join("empty.jpg"), b"").unwrap();
        write_corrupt(&dir.join("page"));

        validate_assets(root).unwrap();

        assert_eq!(file_names(&dir), BTreeSet::from(["real".to_string()]));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let cats = populate(root, "cats", 4, 3);

        validate_assets(root).unwrap();
        let once = file_names(&cats);
        let report = validate_assets(root).unwrap();

        assert_eq!(file_names(&cats), once);
        assert_eq!(report.total_removed(), 0);
    }

    #[test]
    fn test_all_corrupt_leaves_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let birds = populate(root, "birds", 0, 3);

        validate_assets(root).unwrap();

        assert!(birds.is_dir());
        assert!(file_names(&birds).is_empty());
    }

    #[test]
    fn test_split_directories_are_not_validated() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let valid = root.join("valid");
        fs::create_dir(&valid).unwrap();
        write_corrupt(&valid.join("keep_me.jpg"));

        let report = validate_assets(root).unwrap();

        assert!(report.terms.is_empty());
        assert!(valid.join("keep_me.jpg").exists());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nope");
        assert!(matches!(
            validate_assets(&root),
            Err(AppError::PathIo { .. })
        ));
    }
}
