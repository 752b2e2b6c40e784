//! Data models for stored price observations.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ValueRef};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::schema::Column;

/// A price observation stored in `hotel_prices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelPriceRecord {
    /// Database row ID, assigned on insert.
    pub id: i64,
    pub hotel_name: String,
    pub city: String,
    /// Check-in date as stored (usually `YYYY-MM-DD`).
    pub check_in_date: String,
    /// Check-out date as stored (usually `YYYY-MM-DD`).
    pub check_out_date: String,
    pub price: StoredPrice,
    pub rating: Option<String>,
    pub address: Option<String>,
    /// When the price was scraped.
    pub scraped_date: String,
}

impl HotelPriceRecord {
    /// Render one field for display. `None` means the stored value is NULL.
    pub fn value(&self, column: Column) -> Option<String> {
        match column {
            Column::Id => Some(self.id.to_string()),
            Column::HotelName => Some(self.hotel_name.clone()),
            Column::City => Some(self.city.clone()),
            Column::CheckInDate => Some(self.check_in_date.clone()),
            Column::CheckOutDate => Some(self.check_out_date.clone()),
            Column::Price => match self.price {
                StoredPrice::Null => None,
                ref price => Some(price.to_string()),
            },
            Column::Rating => self.rating.clone(),
            Column::Address => self.address.clone(),
            Column::ScrapedDate => Some(self.scraped_date.clone()),
        }
    }

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            hotel_name: row.get(1)?,
            city: row.get(2)?,
            check_in_date: row.get(3)?,
            check_out_date: row.get(4)?,
            price: row.get(5)?,
            rating: row.get(6)?,
            address: row.get(7)?,
            scraped_date: row.get(8)?,
        })
    }
}

/// The `price` column as read back from the store.
///
/// `REAL` affinity keeps text that does not look numeric, so a row written
/// by another tool can hold anything. Reads never fail on such a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredPrice {
    Real(f64),
    /// Non-numeric value, kept as stored.
    Raw(String),
    Null,
}

impl StoredPrice {
    /// The numeric price, if the stored value is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StoredPrice::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for StoredPrice {
    fn from(v: f64) -> Self {
        StoredPrice::Real(v)
    }
}

impl fmt::Display for StoredPrice {
    /// Numbers keep their REAL form: `80.0`, `120.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredPrice::Real(v) => write!(f, "{:?}", v),
            StoredPrice::Raw(s) => f.write_str(s),
            StoredPrice::Null => f.write_str("NULL"),
        }
    }
}

impl FromSql for StoredPrice {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Real(v) => StoredPrice::Real(v),
            ValueRef::Integer(v) => StoredPrice::Real(v as f64),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                StoredPrice::Raw(String::from_utf8_lossy(bytes).into_owned())
            }
            ValueRef::Null => StoredPrice::Null,
        })
    }
}

/// A price observation that has not been inserted yet.
///
/// # Example
///
/// ```
/// use hotelprice_store::NewHotelPrice;
///
/// let offer = NewHotelPrice::new("Grand Plaza", "Paris", "2024-06-01", "2024-06-03", 120.50)
///     .rating("4.5")
///     .scraped_date("2024-05-01");
/// assert_eq!(offer.scraped_date, "2024-05-01");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHotelPrice {
    pub hotel_name: String,
    pub city: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub price: f64,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub scraped_date: String,
}

impl NewHotelPrice {
    /// Create an observation scraped now (UTC, RFC 3339).
    pub fn new(
        hotel_name: impl Into<String>,
        city: impl Into<String>,
        check_in_date: impl Into<String>,
        check_out_date: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            hotel_name: hotel_name.into(),
            city: city.into(),
            check_in_date: check_in_date.into(),
            check_out_date: check_out_date.into(),
            price,
            rating: None,
            address: None,
            scraped_date: scraped_now(),
        }
    }

    pub fn rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Override the scrape timestamp.
    pub fn scraped_date(mut self, scraped_date: impl Into<String>) -> Self {
        self.scraped_date = scraped_date.into();
        self
    }
}

fn scraped_now() -> String {
    let now = OffsetDateTime::now_utc();
    // Rfc3339 only fails for years outside 0..=9999.
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Column description as printed by the survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type; empty when the column was declared without one.
    pub declared_type: String,
    pub primary_key: bool,
}

impl From<Column> for ColumnInfo {
    fn from(column: Column) -> Self {
        Self {
            name: column.name().to_string(),
            declared_type: column.declared_type().to_string(),
            primary_key: column.is_primary_key(),
        }
    }
}

/// Aggregate price statistics for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPriceStats {
    pub city: String,
    /// Number of observations.
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}
