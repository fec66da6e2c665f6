//! Stores that hold the flavor list between runs
//!
//! A store only knows two things: hand back every item, and replace every
//! item. There is no per-row update.

mod csv_sheet;
mod sqlite;

pub use csv_sheet::CsvStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use scoop_ledger::Item;

/// Persistence collaborator for the inventory
pub trait ItemStore {
    /// Load all items in their stored order
    fn load(&mut self) -> Result<Vec<Item>>;

    /// Replace the stored items with `items`, keeping their order.
    ///
    /// Either every item is written or the previous contents stay in place.
    fn replace_all(&mut self, items: &[Item]) -> Result<()>;
}
