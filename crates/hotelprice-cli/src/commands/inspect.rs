//! Inspect command - survey the store and rank the cheapest prices per city.

use std::io::Write;

use anyhow::{Context, Result};
use hotelprice_store::{HOTEL_PRICES_TABLE, Store, StoreConfig};
use tracing::{debug, warn};

use crate::format::{
    TableReport, format_city_ranking, format_connected, format_error, format_no_cities,
    format_no_tables, format_ranking_banner, format_ranking_unavailable, format_store_missing,
    format_survey_header, format_table_report,
};

/// Number of most recent records shown for `hotel_prices`.
pub const RECENT_RECORDS_LIMIT: u32 = 5;

/// Number of cheapest records shown per city.
pub const CHEAPEST_PER_CITY_LIMIT: u32 = 10;

/// How an inspection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectOutcome {
    /// Both the survey and the ranking ran.
    Complete,
    /// The store file does not exist; nothing else was attempted.
    StoreMissing,
    /// An unexpected store failure stopped the run. It has been reported.
    Failed,
}

/// Execute the inspect command.
///
/// Store failures end up in the report itself; the returned error is only
/// for failing to write to `out`.
pub fn cmd_inspect(config: &StoreConfig, out: &mut impl Write) -> Result<InspectOutcome> {
    let path = &config.db_path;

    let store = match Store::open_read_only(path) {
        Ok(store) => store,
        Err(e) if e.is_not_found() => {
            write!(out, "{}", format_store_missing(path))?;
            return Ok(InspectOutcome::StoreMissing);
        }
        Err(e) => {
            write!(out, "{}", format_error(&e.into()))?;
            return Ok(InspectOutcome::Failed);
        }
    };

    write!(out, "{}", format_connected(path))?;

    let outcome = inspect_store(&store, out)?;
    if outcome == InspectOutcome::Complete {
        writeln!(out, "✅ Database inspection complete!")?;
    }

    Ok(outcome)
}

/// Run the survey and then the ranking against an open store.
fn inspect_store(store: &Store, out: &mut impl Write) -> Result<InspectOutcome> {
    let result = survey(store, out).and_then(|()| ranking(store, out));

    match result {
        Ok(()) => Ok(InspectOutcome::Complete),
        Err(e) => {
            warn!("Inspection stopped: {:#}", e);
            write!(out, "{}", format_error(&e))?;
            Ok(InspectOutcome::Failed)
        }
    }
}

/// Operation A: every table with its columns and row count.
fn survey(store: &Store, out: &mut impl Write) -> Result<()> {
    let tables = store.list_tables().context("Failed to list tables")?;

    if tables.is_empty() {
        write!(out, "{}", format_no_tables())?;
        return Ok(());
    }

    write!(out, "{}", format_survey_header())?;

    for table in &tables {
        let report = survey_table(store, table)?;
        write!(out, "{}", format_table_report(&report))?;
    }

    Ok(())
}

fn survey_table(store: &Store, table: &str) -> Result<TableReport> {
    let columns = store
        .table_columns(table)
        .with_context(|| format!("Failed to read columns of {}", table))?;
    let row_count = store
        .count_rows(table)
        .with_context(|| format!("Failed to count rows of {}", table))?;

    let recent = if table == HOTEL_PRICES_TABLE && row_count > 0 {
        Some(
            store
                .recent_records(RECENT_RECORDS_LIMIT)
                .context("Failed to read recent records")?,
        )
    } else {
        None
    };

    Ok(TableReport {
        name: table.to_string(),
        columns,
        row_count,
        recent,
    })
}

/// Operation B: the cheapest records of every city.
///
/// A failing city list ends this operation only.
fn ranking(store: &Store, out: &mut impl Write) -> Result<()> {
    write!(out, "{}", format_ranking_banner(CHEAPEST_PER_CITY_LIMIT))?;

    let cities = match store.distinct_cities() {
        Ok(cities) => cities,
        Err(e) => {
            warn!("Could not list cities: {:#}", e);
            write!(out, "{}", format_ranking_unavailable())?;
            return Ok(());
        }
    };

    if cities.is_empty() {
        write!(out, "{}", format_no_cities())?;
        return Ok(());
    }

    debug!("Ranking {} cities", cities.len());

    for city in &cities {
        let records = store
            .cheapest_in_city(city, CHEAPEST_PER_CITY_LIMIT)
            .with_context(|| format!("Failed to rank prices for {}", city))?;
        write!(out, "{}", format_city_ranking(city, &records))?;
    }

    Ok(())
}
