//! Output formatting for the inspection report and price statistics.
//!
//! Every function returns the finished text so commands decide where it goes.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use hotelprice_store::{CityPriceStats, Column, ColumnInfo, HotelPriceRecord, StoredPrice};

/// Survey data for one catalog table.
#[derive(Debug, Clone)]
pub struct TableReport {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub row_count: u64,
    /// Most recent records; only collected for a non-empty `hotel_prices`.
    pub recent: Option<Vec<HotelPriceRecord>>,
}

const RULE_WIDTH: usize = 70;
const BANNER_WIDTH: usize = 68;

pub fn format_connected(path: &Path) -> String {
    format!("✅ Connected to {}\n\n", path.display())
}

pub fn format_store_missing(path: &Path) -> String {
    format!("❌ Database file not found: {}\n", path.display())
}

pub fn format_error(err: &anyhow::Error) -> String {
    format!("❌ Error: {:#}\n", err)
}

pub fn format_no_tables() -> String {
    "❌ No tables found in database\n".to_string()
}

pub fn format_survey_header() -> String {
    format!("📋 TABLES IN DATABASE:\n{}\n", "─".repeat(RULE_WIDTH))
}

/// Format one table: columns, row count, then recent records or a no-data note.
pub fn format_table_report(report: &TableReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n📌 Table: {}", report.name);
    out.push_str("   Columns:\n");
    for column in &report.columns {
        let marker = if column.primary_key {
            " [PRIMARY KEY]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "     • {} ({}){}",
            column.name, column.declared_type, marker
        );
    }
    let _ = writeln!(out, "   📊 Total Records: {}", report.row_count);

    if report.row_count == 0 {
        out.push_str("   ℹ️  No data in table yet\n\n");
    } else if let Some(ref recent) = report.recent {
        out.push_str(&format_recent_records(recent));
    }

    out
}

/// Format recent records: `ID:` first, then every other column as `name: value`.
pub fn format_recent_records(records: &[HotelPriceRecord]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n   📋 Last {} Records:", records.len());
    let _ = writeln!(out, "   {}", "-".repeat(65));

    for record in records {
        let _ = writeln!(out, "   ID: {}", record.id);
        for column in Column::ALL.iter().filter(|c| !c.is_primary_key()) {
            let value = record.value(*column);
            let _ = writeln!(
                out,
                "      {}: {}",
                column.name(),
                value.as_deref().unwrap_or("NULL")
            );
        }
        out.push('\n');
    }

    out
}

pub fn format_ranking_banner(limit: u32) -> String {
    let title = format!("TOP {} CHEAPEST BY CITY", limit);
    format!(
        "\n╔{rule}╗\n║{title:^width$}║\n╚{rule}╝\n\n",
        rule = "═".repeat(BANNER_WIDTH),
        title = title,
        width = BANNER_WIDTH
    )
}

pub fn format_ranking_unavailable() -> String {
    "❌ Could not query hotel_prices (table may be missing).\n".to_string()
}

pub fn format_no_cities() -> String {
    "ℹ️  No cities recorded yet\n\n".to_string()
}

/// Format the cheapest records of one city, ranked from 1.
pub fn format_city_ranking(city: &str, records: &[HotelPriceRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📍 {}", city);

    if records.is_empty() {
        out.push_str("   ℹ️  No records yet\n\n");
        return out;
    }

    for (rank, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "   {:2}. {}: ${} — {}",
            rank + 1,
            record.check_in_date,
            ranking_price(&record.price),
            record.hotel_name
        );
    }
    out.push('\n');
    out
}

/// Two decimals for numbers; anything else as stored.
fn ranking_price(price: &StoredPrice) -> String {
    match price.as_f64() {
        Some(v) => format!("{:.2}", v),
        None => price.to_string(),
    }
}

/// Format price statistics as an aligned text table.
pub fn format_stats_text(stats: &[CityPriceStats]) -> String {
    if stats.is_empty() {
        return "No price data recorded yet\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Price statistics by city:\n\n");
    let _ = writeln!(
        out,
        "  {:20} {:>8} {:>10} {:>10} {:>10}",
        "City", "Count", "Min", "Max", "Avg"
    );
    let _ = writeln!(out, "  {}", "-".repeat(62));

    for s in stats {
        let _ = writeln!(
            out,
            "  {:20} {:>8} {:>10.2} {:>10.2} {:>10.2}",
            s.city, s.count, s.min, s.max, s.avg
        );
    }

    out
}

/// Format price statistics as pretty-printed JSON.
pub fn format_stats_json(stats: &[CityPriceStats]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(stats)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, hotel: &str, check_in: &str, price: f64) -> HotelPriceRecord {
        HotelPriceRecord {
            id,
            hotel_name: hotel.to_string(),
            city: "Paris".to_string(),
            check_in_date: check_in.to_string(),
            check_out_date: "2024-06-03".to_string(),
            price: StoredPrice::Real(price),
            rating: None,
            address: Some("1 Rue de Rivoli".to_string()),
            scraped_date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_table_report_marks_primary_key() {
        let report = TableReport {
            name: "hotel_prices".to_string(),
            columns: Column::ALL.into_iter().map(ColumnInfo::from).collect(),
            row_count: 0,
            recent: None,
        };

        let text = format_table_report(&report);
        assert!(text.contains("📌 Table: hotel_prices"));
        assert!(text.contains("• id (INTEGER) [PRIMARY KEY]"));
        assert!(text.contains("• price (REAL)\n"));
        assert!(text.contains("📊 Total Records: 0"));
        assert!(text.contains("No data in table yet"));
    }

    #[test]
    fn test_recent_records_field_order() {
        let text = format_recent_records(&[record(3, "Grand Plaza", "2024-06-01", 120.5)]);

        let id = text.find("ID: 3").unwrap();
        let hotel = text.find("hotel_name: Grand Plaza").unwrap();
        let price = text.find("price: 120.5").unwrap();
        let scraped = text.find("scraped_date: 2024-05-01").unwrap();
        assert!(id < hotel && hotel < price && price < scraped);
        assert!(text.contains("rating: NULL"));
        assert!(text.contains("address: 1 Rue de Rivoli"));
        assert!(!text.contains("      id:"));
    }

    #[test]
    fn test_city_ranking_lines() {
        let records = [
            record(1, "Budget Inn", "2024-06-02", 80.0),
            record(2, "Grand Plaza", "2024-06-01", 95.5),
        ];

        let text = format_city_ranking("Paris", &records);
        assert!(text.starts_with("📍 Paris\n"));
        assert!(text.contains("    1. 2024-06-02: $80.00 — Budget Inn\n"));
        assert!(text.contains("    2. 2024-06-01: $95.50 — Grand Plaza\n"));
    }

    #[test]
    fn test_recent_records_whole_number_price() {
        let text = format_recent_records(&[record(4, "Budget Inn", "2024-06-02", 80.0)]);
        assert!(text.contains("      price: 80.0\n"));
    }

    #[test]
    fn test_city_ranking_non_numeric_price() {
        let mut unpriced = record(2, "Ritz", "2024-06-05", 0.0);
        unpriced.price = StoredPrice::Raw("N/A".to_string());

        let text = format_city_ranking("Paris", &[record(1, "Ibis", "2024-06-01", 70.0), unpriced]);
        assert!(text.contains("    1. 2024-06-01: $70.00 — Ibis\n"));
        assert!(text.contains("    2. 2024-06-05: $N/A — Ritz\n"));
    }

    #[test]
    fn test_city_ranking_without_records() {
        let text = format_city_ranking("Paris", &[]);
        assert!(text.contains("No records yet"));
    }

    #[test]
    fn test_ranking_banner_centers_title() {
        let banner = format_ranking_banner(10);
        let title_line = banner.lines().find(|l| l.contains("TOP 10")).unwrap();
        assert_eq!(title_line.chars().count(), BANNER_WIDTH + 2);
    }

    #[test]
    fn test_stats_text_and_json() {
        let stats = vec![CityPriceStats {
            city: "Paris".to_string(),
            count: 3,
            min: 80.0,
            max: 110.0,
            avg: 95.0,
        }];

        let text = format_stats_text(&stats);
        assert!(text.contains("Paris"));
        assert!(text.contains("95.00"));

        let json: serde_json::Value = serde_json::from_str(&format_stats_json(&stats).unwrap()).unwrap();
        assert_eq!(json[0]["city"], "Paris");
        assert_eq!(json[0]["count"], 3);
    }

    #[test]
    fn test_stats_text_empty() {
        assert_eq!(format_stats_text(&[]), "No price data recorded yet\n");
    }
}
