//! Database schema.
//!
//! The layout of `hotel_prices` is described statically by [`Column`], so
//! reporting code never has to ask SQLite what the table looks like.

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

/// Name of the only table owned by this crate.
pub const HOTEL_PRICES_TABLE: &str = "hotel_prices";

/// Columns of `hotel_prices`, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    HotelName,
    City,
    CheckInDate,
    CheckOutDate,
    Price,
    Rating,
    Address,
    ScrapedDate,
}

impl Column {
    /// Every column in declaration order.
    pub const ALL: [Column; 9] = [
        Column::Id,
        Column::HotelName,
        Column::City,
        Column::CheckInDate,
        Column::CheckOutDate,
        Column::Price,
        Column::Rating,
        Column::Address,
        Column::ScrapedDate,
    ];

    /// Column name as declared in SQL.
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::HotelName => "hotel_name",
            Column::City => "city",
            Column::CheckInDate => "check_in_date",
            Column::CheckOutDate => "check_out_date",
            Column::Price => "price",
            Column::Rating => "rating",
            Column::Address => "address",
            Column::ScrapedDate => "scraped_date",
        }
    }

    /// Declared SQLite type.
    pub fn declared_type(self) -> &'static str {
        match self {
            Column::Id => "INTEGER",
            Column::Price => "REAL",
            _ => "TEXT",
        }
    }

    pub fn is_primary_key(self) -> bool {
        self == Column::Id
    }

    /// Whether the column accepts NULL.
    pub fn is_nullable(self) -> bool {
        matches!(self, Column::Rating | Column::Address)
    }

    /// Comma-separated column list for SELECT statements.
    pub(crate) fn select_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create `hotel_prices` if it does not exist yet.
///
/// Safe to call on an already initialized store.
pub fn initialize(conn: &Connection) -> Result<()> {
    debug!("Ensuring table {} exists", HOTEL_PRICES_TABLE);

    // Duplicate observations of the same stay are kept on purpose, so there
    // is no UNIQUE constraint here.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS hotel_prices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hotel_name TEXT NOT NULL,
            city TEXT NOT NULL,
            check_in_date TEXT NOT NULL,
            check_out_date TEXT NOT NULL,
            price REAL NOT NULL,
            rating TEXT,
            address TEXT,
            scraped_date TEXT NOT NULL
        );
        "#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel_price_tables(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='hotel_prices'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    fn pragma_columns(conn: &Connection) -> Vec<(String, String, bool, bool)> {
        conn.prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info('hotel_prices')")
            .unwrap()
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get::<_, i64>(2)? != 0,
                    row.get::<_, i64>(3)? != 0,
                ))
            })
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        assert_eq!(hotel_price_tables(&conn), vec!["hotel_prices".to_string()]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let first = pragma_columns(&conn);

        initialize(&conn).unwrap();
        let second = pragma_columns(&conn);

        assert_eq!(hotel_price_tables(&conn).len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_static_columns_match_created_table() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let actual = pragma_columns(&conn);
        assert_eq!(actual.len(), Column::ALL.len());

        for (column, (name, ty, not_null, pk)) in Column::ALL.iter().zip(actual) {
            assert_eq!(column.name(), name);
            assert_eq!(column.declared_type(), ty);
            assert_eq!(column.is_primary_key(), pk);
            // The primary key is implicitly NOT NULL but not declared as such.
            if !column.is_primary_key() {
                assert_eq!(column.is_nullable(), !not_null, "nullability of {name}");
            }
        }
    }

    #[test]
    fn test_select_list_order() {
        assert!(Column::select_list().starts_with("id, hotel_name, city"));
        assert!(Column::select_list().ends_with("address, scraped_date"));
    }
}
