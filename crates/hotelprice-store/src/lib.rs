//! Local persistence for scraped hotel price observations.
//!
//! This crate owns the single-table SQLite schema (`hotel_prices`) and the
//! read paths used for inspection and reporting.
//!
//! # Features
//!
//! - Idempotent schema initialization
//! - Read-only access to an existing store
//! - Catalog survey (tables, columns, row counts)
//! - Most recent records and cheapest prices per city
//! - Per-city price statistics
//!
//! # Example
//!
//! ```no_run
//! use hotelprice_store::{RecordQuery, Store};
//!
//! let store = Store::open_read_only(hotelprice_store::DEFAULT_DB_PATH)?;
//!
//! for city in store.distinct_cities()? {
//!     let cheapest = store.query_records(&RecordQuery::new().city(&city).cheapest_first().limit(10))?;
//!     println!("{city}: {} offers", cheapest.len());
//! }
//! # Ok::<(), hotelprice_store::Error>(())
//! ```

mod error;
mod models;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::{CityPriceStats, ColumnInfo, HotelPriceRecord, NewHotelPrice, StoredPrice};
pub use queries::{RecordOrder, RecordQuery};
pub use schema::{Column, HOTEL_PRICES_TABLE};
pub use store::Store;

/// Default store location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "hotel_pricing.db";

/// Configuration handed to every command that touches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the SQLite file.
    pub db_path: std::path::PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
