//! SQLite store for the flavor list
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! Every replace runs in one transaction, so a failed write leaves the
//! previous list in place.

use super::ItemStore;
use crate::error::{InventoryError, Result};
use rusqlite::{params, Connection, Transaction};
use scoop_ledger::{Item, ItemRecord};
use std::path::Path;

/// Result type for raw database operations
pub type DbResult<T> = rusqlite::Result<T>;

/// Flavor list kept in an SQLite `items` table
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and initialise the schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        log::info!("Opened database: {}", path.display());
        Self::from_connection(conn)
    }

    /// In-memory database, gone when the store is dropped
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Number of stored items
    pub fn item_count(&self) -> DbResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
    }

    /// Borrow the underlying connection (for inspection)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Initialize the database schema
///
/// `position` is the item's place in the list; names are not unique keys
/// because the sheet never enforced that.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS items (
            position INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            reserve INTEGER NOT NULL,
            stock REAL NOT NULL,
            tossed REAL NOT NULL DEFAULT 0,
            low INTEGER NOT NULL DEFAULT 1,
            high INTEGER NOT NULL DEFAULT 5,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    log::debug!("Database schema initialized");
    Ok(())
}

fn replace_all_tx(tx: &Transaction<'_>, items: &[Item]) -> DbResult<usize> {
    tx.execute("DELETE FROM items", [])?;

    let mut stmt = tx.prepare_cached(
        "INSERT INTO items (position, name, reserve, stock, tossed, low, high, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))",
    )?;

    let mut count = 0;
    for (position, item) in items.iter().enumerate() {
        stmt.execute(params![
            position as i64,
            item.name(),
            item.reserve(),
            item.stock().as_f64(),
            item.tossed(),
            item.low(),
            item.high(),
        ])?;
        count += 1;
    }
    Ok(count)
}

impl ItemStore for SqliteStore {
    fn load(&mut self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT position, name, reserve, stock, tossed, low, high
             FROM items
             ORDER BY position ASC",
        )?;

        let rows: DbResult<Vec<(i64, ItemRecord)>> = stmt
            .query_map([], |row| {
                let reserve: i64 = row.get(2)?;
                Ok((
                    row.get(0)?,
                    ItemRecord {
                        name: row.get(1)?,
                        reserve: reserve as f64,
                        stock: row.get(3)?,
                        tossed: row.get(4)?,
                        low: row.get(5)?,
                        high: row.get(6)?,
                    },
                ))
            })?
            .collect();

        let items = rows?
            .into_iter()
            .map(|(position, record)| {
                Item::try_from(record).map_err(|e| {
                    InventoryError::Store(format!("invalid row at position {}: {}", position, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Loaded {} items from database", items.len());
        Ok(items)
    }

    fn replace_all(&mut self, items: &[Item]) -> Result<()> {
        let tx = self.conn.transaction()?;
        let count = replace_all_tx(&tx, items)?;
        tx.commit()?;
        log::debug!("Replaced database contents with {} items", count);
        Ok(())
    }
}
