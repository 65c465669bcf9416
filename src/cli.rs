use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::prepare::PrepareArgs;
use crate::terms::parse_search_terms;
use crate::toml_utils::parse_toml;

/// Download images for a list of search terms and lay them out as `train/<term>` and
/// `valid/<term>` for an image classifier.
///
/// Options not given on the command line come from `--config`, then from built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "training-data-generator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Destination directory; will contain `train/` and `valid/` [default: test-data]
    #[arg(short = 'd', value_name = "DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Comma-separated list of terms to search for [default: cats,dogs]
    #[arg(short = 's', value_name = "TERMS")]
    pub search_terms: Option<String>,

    /// How many images to get for each search term (max 100) [default: 100]
    #[arg(short = 'q', value_name = "N")]
    pub quantity_per_term: Option<u32>,

    /// Percentage of images set aside for the validation set [default: 20]
    #[arg(short = 'v', value_name = "PCT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub valid_pct: Option<u8>,

    /// Path to chromedriver binary [default: /usr/local/bin/chromedriver]
    #[arg(short = 'c', value_name = "PATH")]
    pub chromedriver: Option<PathBuf>,

    /// TOML config file with a `[prepare]` table
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Image downloader program [default: googleimagesdownload]
    #[arg(long, value_name = "PROGRAM")]
    pub downloader: Option<String>,

    /// Seed for the random validation split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use images already in the destination directory instead of downloading
    #[arg(long)]
    pub skip_acquire: bool,

    /// Show debug output
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the effective configuration: flags override the config file, which overrides
    /// the defaults.
    pub fn into_args(self) -> Result<PrepareArgs> {
        let mut args = match &self.config {
            Some(path) => parse_toml(path)?,
            None => PrepareArgs::default(),
        };

        if let Some(dest_dir) = self.dest_dir {
            args.dest_dir = dest_dir;
        }
        if let Some(terms) = self.search_terms {
            args.search_terms = parse_search_terms(&terms)?;
        }
        if let Some(quantity) = self.quantity_per_term {
            args.quantity_per_term = quantity;
        }
        if let Some(pct) = self.valid_pct {
            args.valid_pct = pct;
        }
        if let Some(chromedriver) = self.chromedriver {
            args.chromedriver = chromedriver;
        }
        if let Some(downloader) = self.downloader {
            args.downloader = downloader;
        }
        if self.seed.is_some() {
            args.seed = self.seed;
        }
        args.skip_acquire |= self.skip_acquire;
        args.verbose |= self.verbose;

        Ok(args)
    }
}
