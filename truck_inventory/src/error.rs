//! Error types for truck_inventory

use scoop_ledger::LedgerError;
use thiserror::Error;

/// Unified error type for truck_inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The ledger rejected the operation; nothing was changed
    #[error("Rejected: {0}")]
    Ledger(#[from] LedgerError),
    /// SQLite operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Reading or writing a CSV sheet failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to render JSON output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A store handed back data the ledger cannot hold
    #[error("Store error: {0}")]
    Store(String),
    /// No item matches the given position or name
    #[error("No item matches '{0}'")]
    UnknownItem(String),
}

/// Result alias for truck_inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
