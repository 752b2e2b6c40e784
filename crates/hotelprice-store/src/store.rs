//! Main store implementation.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{CityPriceStats, ColumnInfo, HotelPriceRecord, NewHotelPrice};
use crate::queries::RecordQuery;
use crate::schema::{self, Column, HOTEL_PRICES_TABLE};

const INSERT_SQL: &str = "INSERT INTO hotel_prices (hotel_name, city, check_in_date,
     check_out_date, price, rating, address, scraped_date)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// SQLite-based store for hotel price observations.
///
/// The connection is closed when the store is dropped.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path and ensure the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        schema::initialize(&conn)?;
        info!("Schema ready in {}", path.display());

        Ok(Self { conn })
    }

    /// Open an existing database without creating it or touching the schema.
    ///
    /// Returns [`Error::NotFound`] when the file does not exist.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }

        info!("Opening database read-only at {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection without applying the schema.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

// Catalog operations
impl Store {
    /// List every table in the catalog, ordered by name.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;

        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        debug!("Found {} tables", tables.len());
        Ok(tables)
    }

    /// Describe the columns of a table.
    ///
    /// `hotel_prices` is described from [`Column`]; any other table is read
    /// from SQLite's table info.
    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        if table == HOTEL_PRICES_TABLE {
            return Ok(Column::ALL.into_iter().map(ColumnInfo::from).collect());
        }

        let mut stmt = self
            .conn
            .prepare("SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid")?;

        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    declared_type: row.get(1)?,
                    primary_key: row.get::<_, i64>(2)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(columns)
    }

    /// Count the rows of any table in the catalog.
    pub fn count_rows(&self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table)?);
        debug!("Executing query: {}", sql);

        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Quote a table name for interpolation into SQL.
fn quote_identifier(name: &str) -> Result<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidTableName(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

// Record operations
impl Store {
    /// Insert a single observation, returning its new `id`.
    pub fn insert_record(&self, record: &NewHotelPrice) -> Result<i64> {
        self.conn.execute(INSERT_SQL, insert_params(record).as_slice())?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert observations in one transaction.
    ///
    /// Either every record is inserted or none is.
    pub fn insert_records(&self, records: &[NewHotelPrice]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for record in records {
                inserted += stmt.execute(insert_params(record).as_slice())?;
            }
        }

        tx.commit()?;
        info!("Inserted {} hotel price records", inserted);
        Ok(inserted)
    }

    /// Count observations in `hotel_prices`.
    pub fn count_records(&self) -> Result<u64> {
        self.count_rows(HOTEL_PRICES_TABLE)
    }

    /// Query observations with filters.
    pub fn query_records(&self, query: &RecordQuery) -> Result<Vec<HotelPriceRecord>> {
        let sql = query.build_sql();
        let (_, params) = query.build_where();

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_ref.as_slice(), HotelPriceRecord::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// The `limit` most recently inserted observations, newest first.
    pub fn recent_records(&self, limit: u32) -> Result<Vec<HotelPriceRecord>> {
        self.query_records(&RecordQuery::new().limit(limit))
    }

    /// Up to `limit` observations for a city, cheapest first.
    pub fn cheapest_in_city(&self, city: &str, limit: u32) -> Result<Vec<HotelPriceRecord>> {
        self.query_records(&RecordQuery::new().city(city).cheapest_first().limit(limit))
    }

    /// Distinct cities, sorted ascending.
    pub fn distinct_cities(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT city FROM hotel_prices ORDER BY city ASC")?;

        let cities = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(cities)
    }
}

fn insert_params(record: &NewHotelPrice) -> [&dyn rusqlite::ToSql; 8] {
    [
        &record.hotel_name,
        &record.city,
        &record.check_in_date,
        &record.check_out_date,
        &record.price,
        &record.rating,
        &record.address,
        &record.scraped_date,
    ]
}

// Statistics
impl Store {
    /// Price statistics for every city, ordered by city.
    ///
    /// Only numeric prices are counted.
    pub fn city_price_stats(&self) -> Result<Vec<CityPriceStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT city, COUNT(*), MIN(price), MAX(price), AVG(price)
             FROM hotel_prices WHERE typeof(price) IN ('real', 'integer')
             GROUP BY city ORDER BY city ASC",
        )?;

        let stats = stmt
            .query_map([], stats_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(stats)
    }

    /// Price statistics for one city, or `None` if it has no observations.
    pub fn price_stats(&self, city: &str) -> Result<Option<CityPriceStats>> {
        let stats = self
            .conn
            .query_row(
                "SELECT city, COUNT(*), MIN(price), MAX(price), AVG(price)
                 FROM hotel_prices
                 WHERE city = ?1 AND typeof(price) IN ('real', 'integer')
                 GROUP BY city",
                [city],
                stats_from_row,
            )
            .optional()?;

        Ok(stats)
    }
}

fn stats_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CityPriceStats> {
    Ok(CityPriceStats {
        city: row.get(0)?,
        count: row.get::<_, i64>(1)? as u64,
        min: row.get(2)?,
        max: row.get(3)?,
        avg: row.get(4)?,
    })
}
