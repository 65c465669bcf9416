use anyhow::{Context, Result};
use clap::Parser;

use training_data_generator::{Cli, init_logger, run_preparation};

fn main() -> Result<()> {
    let args = Cli::parse().into_args().context("Invalid options")?;
    init_logger(args.verbose);
    args.log_summary();

    let report = run_preparation(&args)
        .with_context(|| format!("Failed to prepare training data in {:?}", args.dest_dir))?;

    tracing::info!(
        "Prepared {} search terms in {:?}",
        report.splits.len(),
        args.dest_dir
    );
    Ok(())
}
