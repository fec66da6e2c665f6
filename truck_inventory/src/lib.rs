//! Truck Inventory - ice-cream tub tracking
//!
//! Applies ledger operations to the flavor list and keeps every change in a
//! store (SQLite table or CSV sheet). The in-memory list only advances once
//! the store has confirmed the write.

pub mod error;
pub mod formatters;
pub mod inventory;
pub mod store;

pub use error::{InventoryError, Result};
pub use formatters::{format_inventory_list, format_item_detail};
pub use inventory::{Inventory, TossOutcome};
pub use store::{CsvStore, ItemStore, SqliteStore};
