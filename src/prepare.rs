use serde::Deserialize;
use std::path::PathBuf;
use std::time::Instant;

use crate::acquire::{Acquire, ExistingDirectory, ExternalDownloader};
use crate::dataset::{PartitionSummary, ValidationReport, partition, scaffold, validate_assets};
use crate::error::{AppError, Result};
use crate::sampler::{RandomSelector, Selector};
use crate::terms::{SearchTerm, deserialize_search_terms, parse_search_terms};

/// Most images the downloader returns per term without extra setup
pub const DOWNLOADER_LIMIT: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrepareArgs {
    /// Destination root, ends up holding `train/` and `valid/`
    pub dest_dir: PathBuf,

    /// Search terms, one class directory each
    #[serde(deserialize_with = "deserialize_search_terms")]
    pub search_terms: Vec<SearchTerm>,

    /// Images requested per term
    pub quantity_per_term: u32,

    /// Percentage of each term's images set aside for validation (0-100)
    pub valid_pct: u8,

    /// Path to the chromedriver binary used by the downloader
    pub chromedriver: PathBuf,

    /// Downloader program to run
    pub downloader: String,

    /// Use images already under `dest_dir` instead of downloading
    pub skip_acquire: bool,

    /// Seed for the validation split, random when unset
    pub seed: Option<u64>,

    /// Show verbose output
    pub verbose: bool,
}

impl Default for PrepareArgs {
    fn default() -> Self {
        Self {
            dest_dir: PathBuf::from("test-data"),
            search_terms: parse_search_terms("cats,dogs").unwrap_or_default(),
            quantity_per_term: DOWNLOADER_LIMIT,
            valid_pct: 20,
            chromedriver: PathBuf::from("/usr/local/bin/chromedriver"),
            downloader: "googleimagesdownload".to_string(),
            skip_acquire: false,
            seed: None,
            verbose: false,
        }
    }
}

impl PrepareArgs {
    /// Check the configuration before anything touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.search_terms.is_empty() {
            return Err(AppError::Config("no search terms given".to_string()));
        }
        if self.valid_pct > 100 {
            return Err(AppError::InvalidPercentage(self.valid_pct));
        }
        if self.quantity_per_term == 0 {
            return Err(AppError::Config(
                "quantity per term must be at least 1".to_string(),
            ));
        }
        if self.quantity_per_term > DOWNLOADER_LIMIT {
            tracing::warn!(
                "Requested {} images per term, the downloader returns at most {}",
                self.quantity_per_term,
                DOWNLOADER_LIMIT
            );
        }
        Ok(())
    }

    /// Log the effective options
    pub fn log_summary(&self) {
        tracing::info!("destination folder: {:?}", self.dest_dir);
        tracing::info!(
            "search terms: {:?}",
            self.search_terms
                .iter()
                .map(SearchTerm::as_str)
                .collect::<Vec<_>>()
        );
        tracing::info!("quantity per term: {}", self.quantity_per_term);
        tracing::info!("validation set percentage: {}%", self.valid_pct);
        tracing::info!("chromedriver path: {:?}", self.chromedriver);
        if let Some(seed) = self.seed {
            tracing::info!("random seed: {}", seed);
        }
    }
}

/// What a finished run did
#[derive(Debug, Clone)]
pub struct PrepareReport {
    pub validation: ValidationReport,
    pub splits: Vec<PartitionSummary>,
}

/// Acquire, validate, scaffold and partition with explicit collaborators.
///
/// Not reentrant: a second run on an already partitioned root fails with
/// `AppError::MissingTermDirectory` for the first term.
///
/// Any error from the partition step comes wrapped in `AppError::PartitionIncomplete`, since
/// earlier terms may already have been moved.
pub fn run_pipeline(
    args: &PrepareArgs,
    acquirer: &dyn Acquire,
    selector: &mut dyn Selector,
) -> Result<PrepareReport> {
    let start_time = Instant::now();
    args.validate()?;

    acquirer.acquire(
        &args.search_terms,
        args.quantity_per_term,
        &args.dest_dir,
        &args.chromedriver,
    )?;

    let validation = validate_assets(&args.dest_dir)?;
    tracing::info!(
        "Validation kept {} images ({} unverified), removed {} unreadable files",
        validation.total_kept(),
        validation.total_unverified(),
        validation.total_removed()
    );

    scaffold(&args.dest_dir)?;
    let splits = partition(&args.dest_dir, &args.search_terms, args.valid_pct, selector)
        .map_err(|e| AppError::PartitionIncomplete {
            root: args.dest_dir.clone(),
            source: Box::new(e),
        })?;

    for s in &splits {
        tracing::info!(
            "{}: {} images -> train {}, valid {}",
            s.term,
            s.total,
            s.train,
            s.valid
        );
    }

    let duration = start_time.elapsed();
    tracing::info!("Total preparation time: {:.3?}", duration);

    Ok(PrepareReport { validation, splits })
}

/// Core preparation API, wiring the downloader and random source from `args`.
pub fn run_preparation(args: &PrepareArgs) -> Result<PrepareReport> {
    let acquirer: Box<dyn Acquire> = if args.skip_acquire {
        Box::new(ExistingDirectory)
    } else {
        Box::new(ExternalDownloader::new(args.downloader.clone()))
    };
    let mut selector = RandomSelector::from_seed(args.seed);

    run_pipeline(args, acquirer.as_ref(), &mut selector)
}
