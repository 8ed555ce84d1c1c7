//! Fetch command implementation.
//!
//! Runs the pipeline with a progress bar and prints a summary per table.

use super::{RunOptions, parse_frequency};
use crate::display::print_table_summary;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use macrodash_lib::ProgressHook;
use macrodash_lib::prelude::*;
use std::sync::Arc;

/// Creates the per-series progress bar.
pub(crate) fn progress_bar(total: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} series {msg}")
            .expect("Invalid progress template")
            .progress_chars("=>-"),
    );
    pb
}

/// Progress hook that advances the bar and names the last series.
pub(crate) fn progress_hook(pb: &ProgressBar) -> ProgressHook {
    let pb = pb.clone();
    Arc::new(move |spec: &SeriesSpec, ok: bool| {
        pb.inc(1);
        if !ok {
            pb.set_message(format!("failed: {}", spec.display_name()));
        }
    })
}

/// Run the pipeline for one or all frequency groups.
pub(crate) async fn fetch(options: &RunOptions, frequency: Option<&str>) -> Result<()> {
    let frequency = frequency.map(parse_frequency).transpose()?;
    let catalog = SeriesCatalog::builtin();
    let total = match frequency {
        Some(f) => catalog.by_frequency(f).count(),
        None => catalog.len(),
    };

    let pb = progress_bar(total, options.quiet);
    let pipeline = options.pipeline(Some(progress_hook(&pb)))?;

    match frequency {
        Some(frequency) => {
            let (table, failures, _) = pipeline.run_group(frequency).await;
            pb.finish_with_message("done");
            print_table_summary(&table, &failures.iter().collect::<Vec<_>>());
        }
        None => {
            let snapshot = pipeline.run().await?;
            pb.finish_with_message(format!(
                "{} series failed",
                snapshot.failures.len()
            ));
            for &frequency in Frequency::all() {
                let failures: Vec<_> = snapshot.failures_in(frequency).collect();
                print_table_summary(snapshot.table(frequency), &failures);
            }
            println!(
                "\nFetched at {}",
                snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }

    Ok(())
}
