//! Latest command implementation.

use super::{RunOptions, parse_frequency};
use crate::commands::fetch::{progress_bar, progress_hook};
use crate::display::format_change;
use anyhow::{Result, bail};
use macrodash_lib::prelude::*;

/// Print the latest value of each requested column with its change.
pub(crate) async fn latest(options: &RunOptions, frequency: &str, columns: &[String]) -> Result<()> {
    let frequency = parse_frequency(frequency)?;
    let catalog = SeriesCatalog::builtin();

    let pb = progress_bar(catalog.by_frequency(frequency).count(), options.quiet);
    let pipeline = options.pipeline(Some(progress_hook(&pb)))?;
    let (table, failures, succeeded) = pipeline.run_group(frequency).await;
    pb.finish_and_clear();

    if succeeded == 0 {
        bail!("No {frequency} series could be fetched ({} failed)", failures.len());
    }

    let names: Vec<&str> = if columns.is_empty() {
        table.column_names().collect()
    } else {
        columns.iter().map(String::as_str).collect()
    };

    println!(
        "{:<48} {:<10} {:>14} {:>12}  {}",
        "COLUMN", "PERIOD", "LATEST", "CHANGE", "UNITS"
    );
    println!("{}", "-".repeat(100));

    for name in names {
        let Some(change) = latest_change(&table, name) else {
            println!("{name:<48} {:<10} {:>14}", "-", "n/a");
            continue;
        };
        println!(
            "{:<48} {:<10} {:>14.2} {:>12}  {}",
            name,
            frequency.period_label(change.date),
            change.current,
            format_change(&change),
            catalog.unit_label(name)
        );
    }

    for failure in &failures {
        println!("missing: {failure}");
    }
    Ok(())
}
