use std::path::Path;
use std::process::Command;

use crate::error::{AppError, Result};
use crate::terms::SearchTerm;

/// Populates `output_dir/<term>` with candidate images for every term.
///
/// Implementations make no promise that the downloaded files are valid images.
pub trait Acquire {
    fn acquire(
        &self,
        terms: &[SearchTerm],
        limit_per_term: u32,
        output_dir: &Path,
        driver_path: &Path,
    ) -> Result<()>;
}

/// Runs an external Google Images downloader such as `googleimagesdownload`.
#[derive(Debug, Clone)]
pub struct ExternalDownloader {
    program: String,
}

impl ExternalDownloader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(
        &self,
        terms: &[SearchTerm],
        limit_per_term: u32,
        output_dir: &Path,
        driver_path: &Path,
    ) -> Command {
        let keywords = terms
            .iter()
            .map(SearchTerm::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let mut cmd = Command::new(&self.program);
        cmd.arg("--keywords")
            .arg(keywords)
            .arg("--limit")
            .arg(limit_per_term.to_string())
            .arg("--type")
            .arg("photo")
            .arg("--output_directory")
            .arg(output_dir)
            .arg("--chromedriver")
            .arg(driver_path);
        cmd
    }
}

impl Acquire for ExternalDownloader {
    fn acquire(
        &self,
        terms: &[SearchTerm],
        limit_per_term: u32,
        output_dir: &Path,
        driver_path: &Path,
    ) -> Result<()> {
        let mut cmd = self.command(terms, limit_per_term, output_dir, driver_path);
        tracing::info!("Running image downloader: {:?}", cmd);

        let status = cmd
            .status()
            .map_err(|e| AppError::Acquisition(format!("failed to start {:?}: {}", self.program, e)))?;

        if !status.success() {
            return Err(AppError::Acquisition(format!(
                "{:?} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Uses whatever is already under the destination root instead of downloading.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingDirectory;

impl Acquire for ExistingDirectory {
    fn acquire(
        &self,
        _terms: &[SearchTerm],
        _limit_per_term: u32,
        output_dir: &Path,
        _driver_path: &Path,
    ) -> Result<()> {
        if !output_dir.is_dir() {
            return Err(AppError::Acquisition(format!(
                "destination root {:?} does not exist, nothing to prepare",
                output_dir
            )));
        }
        tracing::info!("Skipping download, using existing images in {:?}", output_dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::parse_search_terms;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[test]
    fn test_downloader_arguments() {
        let terms = parse_search_terms("vespa gtv, vespa 946").unwrap();
        let downloader = ExternalDownloader::new("googleimagesdownload");

        let cmd = downloader.command(
            &terms,
            50,
            Path::new("out"),
            Path::new("/usr/local/bin/chromedriver"),
        );

        assert_eq!(cmd.get_program(), "googleimagesdownload");
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            [
                "--keywords",
                "vespa gtv,vespa 946",
                "--limit",
                "50",
                "--type",
                "photo",
                "--output_directory",
                "out",
                "--chromedriver",
                "/usr/local/bin/chromedriver",
            ]
            .map(OsStr::new)
        );
    }

    #[test]
    fn test_missing_downloader_is_acquisition_error() {
        let temp_dir = TempDir::new().unwrap();
        let terms = parse_search_terms("cats").unwrap();
        let downloader = ExternalDownloader::new("definitely-not-an-image-downloader-binary");

        let err = downloader
            .acquire(&terms, 1, temp_dir.path(), Path::new("chromedriver"))
            .unwrap_err();

        assert!(matches!(err, AppError::Acquisition(_)));
    }

    #[test]
    fn test_existing_directory_requires_root() {
        let temp_dir = TempDir::new().unwrap();
        let terms = parse_search_terms("cats").unwrap();
        let driver = Path::new("chromedriver");

        assert!(
            ExistingDirectory
                .acquire(&terms, 1, temp_dir.path(), driver)
                .is_ok()
        );
        assert!(
            ExistingDirectory
                .acquire(&terms, 1, &temp_dir.path().join("missing"), driver)
                .is_err()
        );
    }
}
