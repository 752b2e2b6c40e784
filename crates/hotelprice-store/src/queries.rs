//! Query builder for stored price observations.
//!
//! [`RecordQuery`] follows the builder pattern. It covers both read paths of
//! the report: most recent records (newest `id` first) and cheapest offers
//! for a city (lowest `price` first).
//!
//! # Example
//!
//! ```
//! use hotelprice_store::{RecordQuery, Store};
//!
//! let store = Store::open_in_memory()?;
//!
//! let recent = store.query_records(&RecordQuery::new().limit(5))?;
//! let cheapest = store.query_records(
//!     &RecordQuery::new().city("Paris").cheapest_first().limit(10),
//! )?;
//! # assert!(recent.is_empty() && cheapest.is_empty());
//! # Ok::<(), hotelprice_store::Error>(())
//! ```

use crate::schema::{Column, HOTEL_PRICES_TABLE};

/// Ordering applied to a [`RecordQuery`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrder {
    /// Highest `id` first, i.e. most recently inserted.
    #[default]
    NewestFirst,
    /// Lowest `price` first. Ties keep SQLite's natural row order.
    CheapestFirst,
}

impl RecordOrder {
    fn order_by(self) -> &'static str {
        match self {
            RecordOrder::NewestFirst => "id DESC",
            RecordOrder::CheapestFirst => "price ASC",
        }
    }
}

/// Fluent query builder for `hotel_prices`.
///
/// By default, queries return every record ordered newest first.
#[derive(Debug, Default, Clone)]
pub struct RecordQuery {
    /// Filter by city (exact match).
    pub city: Option<String>,
    /// Filter by hotel name (exact match).
    pub hotel_name: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    pub order: RecordOrder,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only include records for this city.
    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    /// Only include records for this hotel.
    pub fn hotel(mut self, hotel_name: &str) -> Self {
        self.hotel_name = Some(hotel_name.to_string());
        self
    }

    /// Limit the maximum number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order by price ascending instead of newest first.
    pub fn cheapest_first(mut self) -> Self {
        self.order = RecordOrder::CheapestFirst;
        self
    }

    /// Build the SQL WHERE clause and parameters.
    pub(crate) fn build_where(&self) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref city) = self.city {
            conditions.push("city = ?");
            params.push(Box::new(city.clone()));
        }

        if let Some(ref hotel_name) = self.hotel_name {
            conditions.push("hotel_name = ?");
            params.push(Box::new(hotel_name.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    /// Build the full SQL query.
    pub(crate) fn build_sql(&self) -> String {
        let (where_clause, _) = self.build_where();

        let mut sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            Column::select_list(),
            HOTEL_PRICES_TABLE,
            where_clause,
            self.order.order_by()
        );

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }
}
