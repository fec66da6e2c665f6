//! Scoop Ledger - tub accounting for an ice-cream truck
//!
//! Tracks, per flavor, the tubs held in reserve, the tubs in front stock
//! (including at most one opened, "scooped" tub) and the running total of
//! tossed half tubs. No I/O happens here; stores and front ends live in
//! `truck_inventory`.

pub mod error;
pub mod item;
pub mod ledger;

pub use error::{LedgerError, Result};
pub use item::{Item, ItemDetail, ItemRecord, Stock, Thresholds};
pub use ledger::{Ledger, StockTap};
