//! Export command implementation.

use super::{RunOptions, parse_frequency};
use crate::commands::fetch::{progress_bar, progress_hook};
use crate::display::{Format, write_table};
use anyhow::{Result, bail};
use macrodash_lib::prelude::*;
use std::path::PathBuf;

/// Build one frequency table and write it to a file.
pub(crate) async fn export(
    options: &RunOptions,
    frequency: &str,
    output: Option<PathBuf>,
    format: Format,
    period_labels: bool,
) -> Result<()> {
    let frequency = parse_frequency(frequency)?;

    // Determine output path (default to <frequency>.<format>)
    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("{frequency}.{}", format.extension())));

    let pb = progress_bar(
        SeriesCatalog::builtin().by_frequency(frequency).count(),
        options.quiet,
    );
    let pipeline = options.pipeline(Some(progress_hook(&pb)))?;
    let (table, failures, succeeded) = pipeline.run_group(frequency).await;
    pb.finish_and_clear();

    if succeeded == 0 {
        bail!("No {frequency} series could be fetched ({} failed)", failures.len());
    }

    write_table(&table, &output, format, period_labels)?;

    if !options.quiet {
        println!(
            "Wrote {} rows x {} columns to: {}",
            table.len(),
            table.width(),
            output.display()
        );
        for failure in &failures {
            println!("  missing: {failure}");
        }
    }
    Ok(())
}
