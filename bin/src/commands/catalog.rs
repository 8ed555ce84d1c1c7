//! Catalog command implementation.
//!
//! This module handles listing catalog series with optional filtering.

use super::parse_frequency;
use anyhow::Result;
use macrodash_lib::prelude::*;

/// List catalog series with optional frequency filter or search pattern.
pub(crate) fn list_series(frequency: Option<&str>, search: Option<&str>) -> Result<()> {
    let catalog = SeriesCatalog::builtin();
    let frequency = frequency.map(parse_frequency).transpose()?;

    let series: Vec<&SeriesSpec> = match search {
        Some(pattern) => catalog.search(pattern),
        None => catalog.all().collect(),
    }
    .into_iter()
    .filter(|s| frequency.is_none_or(|f| s.frequency() == f))
    .collect();

    if series.is_empty() {
        println!("No series found.");
        return Ok(());
    }

    println!(
        "{:<48} {:<18} {:<10} {:<16}",
        "NAME", "CODE", "FREQUENCY", "UNITS"
    );
    println!("{}", "-".repeat(94));

    for spec in &series {
        println!(
            "{:<48} {:<18} {:<10} {:<16}",
            spec.display_name(),
            spec.provider_code(),
            spec.frequency().to_string(),
            spec.units()
        );
    }

    println!("\nTotal: {} series", series.len());
    Ok(())
}
