mod acquire;
mod cli;
mod dataset;
mod error;
mod logging;
mod prepare;
mod progress_bar;
mod sampler;
mod terms;
mod toml_utils;

pub use acquire::{Acquire, ExistingDirectory, ExternalDownloader};
pub use cli::Cli;
pub use dataset::{
    PartitionSummary, Split, TermValidation, ValidationReport, partition, scaffold,
    validate_assets, validation_count,
};
pub use error::{AppError, Result};
pub use logging::init_logger;
pub use progress_bar::progress_bar_style;
pub use sampler::{RandomSelector, Selector};
pub use terms::{SearchTerm, parse_search_terms};
pub use toml_utils::parse_toml;

// Core preparation function
pub use prepare::{PrepareArgs, PrepareReport, run_pipeline, run_preparation};
