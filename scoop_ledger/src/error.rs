//! Error types for ledger operations

use thiserror::Error;

/// Why a ledger operation was rejected.
///
/// A rejected operation never mutates the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The operation is not valid for the item's current quantities
    #[error("cannot apply to {item}: {reason}")]
    InvalidPrecondition { item: String, reason: &'static str },
    /// Bad caller input (negative quantity, empty name, unknown position, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    pub(crate) fn precondition(item: &str, reason: &'static str) -> Self {
        LedgerError::InvalidPrecondition {
            item: item.to_string(),
            reason,
        }
    }
}

/// Result alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
