//! Inventory session: the ledger plus the store that keeps it.
//!
//! Each change is made on a copy of the ledger. The copy is written to the
//! store and only replaces the live ledger once the write succeeded, so a
//! failed save never leaves memory ahead of the store.

use crate::error::{InventoryError, Result};
use crate::store::{CsvStore, ItemStore};
use scoop_ledger::{Item, Ledger, StockTap, Thresholds};

/// Result of a toss request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TossOutcome {
    /// The open tub was discarded
    Tossed(Item),
    /// The toss was declined ("someone will eat it"); nothing changed
    Declined,
}

pub struct Inventory<S: ItemStore> {
    ledger: Ledger,
    store: S,
}

impl<S: ItemStore> Inventory<S> {
    /// Load the current list from `store`
    pub fn open(mut store: S, defaults: Thresholds) -> Result<Self> {
        let items = store.load()?;
        log::info!("Loaded {} item(s)", items.len());
        Ok(Self {
            ledger: Ledger::from_items(items, defaults),
            store,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Resolve a position (`"3"`) or a stored name (`"mint chip"`) to a position
    pub fn resolve(&self, key: &str) -> Result<usize> {
        if let Ok(index) = key.trim().parse::<usize>() {
            if index < self.ledger.len() {
                return Ok(index);
            }
        }
        self.ledger
            .position_of(key)
            .ok_or_else(|| InventoryError::UnknownItem(key.to_string()))
    }

    /// Run `op` on a copy of the ledger and keep the copy once it is stored.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Ledger) -> scoop_ledger::Result<T>,
    ) -> Result<T> {
        let mut working = self.ledger.clone();
        let outcome = op(&mut working).map_err(|e| {
            log::warn!("{}", e);
            InventoryError::Ledger(e)
        })?;

        if working == self.ledger {
            return Ok(outcome);
        }
        if let Err(e) = self.store.replace_all(working.items()) {
            log::error!("Failed to save inventory, keeping previous state: {}", e);
            return Err(e);
        }
        self.ledger = working;
        Ok(outcome)
    }

    pub fn promote(&mut self, index: usize) -> Result<Item> {
        self.commit(|ledger| ledger.promote(index).cloned())
    }

    pub fn scoop(&mut self, index: usize) -> Result<Item> {
        self.commit(|ledger| ledger.scoop(index).cloned())
    }

    /// Stock button: scoop, or report that a toss needs confirming
    pub fn tap_stock(&mut self, index: usize) -> Result<StockTap> {
        self.commit(|ledger| ledger.tap_stock(index))
    }

    /// Toss the open tub if `confirmed`; a declined toss changes nothing.
    pub fn toss(&mut self, index: usize, confirmed: bool) -> Result<TossOutcome> {
        if !confirmed {
            let name = self
                .ledger
                .get(index)
                .map(|item| item.name().to_string())
                .ok_or_else(|| InventoryError::UnknownItem(index.to_string()))?;
            log::info!("Toss of {} declined", name);
            return Ok(TossOutcome::Declined);
        }
        self.commit(|ledger| ledger.toss(index).cloned())
            .map(TossOutcome::Tossed)
    }

    pub fn record_delivery(&mut self, index: usize, amount: i64) -> Result<Item> {
        self.commit(|ledger| ledger.record_delivery(index, amount).cloned())
    }

    pub fn update_thresholds(&mut self, index: usize, low: i64, high: i64) -> Result<Item> {
        self.commit(|ledger| ledger.update_thresholds(index, low, high).cloned())
    }

    /// Add a flavor; returns its position
    pub fn create_item(&mut self, name: &str, reserve: i64, stock: i64) -> Result<usize> {
        self.commit(|ledger| ledger.create_item(name, reserve, stock))
    }

    /// Replace the whole list (sheet import)
    pub fn replace_items(&mut self, items: Vec<Item>) -> Result<()> {
        let defaults = self.ledger.defaults();
        self.commit(|ledger| {
            *ledger = Ledger::from_items(items, defaults);
            Ok(())
        })
    }

    /// Replace the whole list with the rows of an existing sheet.
    ///
    /// A missing sheet is an error and leaves the list untouched.
    pub fn import_from(&mut self, sheet: &CsvStore) -> Result<usize> {
        let items = sheet.read_existing().map_err(|e| {
            log::error!("Cannot import {}: {}", sheet.path().display(), e);
            e
        })?;
        let count = items.len();
        self.replace_items(items)?;
        log::info!("Imported {} item(s) from {}", count, sheet.path().display());
        Ok(count)
    }

    /// Copy the current list into another store (sheet export)
    pub fn export_to<T: ItemStore>(&self, target: &mut T) -> Result<usize> {
        target.replace_all(self.ledger.items())?;
        Ok(self.ledger.len())
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
