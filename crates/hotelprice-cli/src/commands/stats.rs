//! Stats command - per-city price statistics.

use std::io::Write;

use anyhow::{Context, Result};
use hotelprice_store::{Store, StoreConfig};

use crate::cli::OutputFormat;
use crate::format::{format_stats_json, format_stats_text};

/// Execute the stats command.
pub fn cmd_stats(
    config: &StoreConfig,
    city: Option<&str>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let store = Store::open_read_only(&config.db_path).context("Failed to open database")?;

    let stats = match city {
        Some(city) => store
            .price_stats(city)
            .with_context(|| format!("Failed to compute statistics for {}", city))?
            .into_iter()
            .collect(),
        None => store
            .city_price_stats()
            .context("Failed to compute statistics")?,
    };

    let formatted = match format {
        OutputFormat::Json => format_stats_json(&stats)?,
        OutputFormat::Text => format_stats_text(&stats),
    };

    write!(out, "{}", formatted)?;
    Ok(())
}
