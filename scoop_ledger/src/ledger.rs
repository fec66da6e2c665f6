//! The inventory ledger: an owned list of items and the moves between
//! reserve, stock and tossed.
//!
//! Items are addressed by position (insertion order). Every operation either
//! applies completely or returns an error and leaves the ledger untouched.

use crate::error::{LedgerError, Result};
use crate::item::{Item, Stock, Thresholds};

/// What tapping an item's stock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTap {
    /// A whole tub was opened
    Scooped,
    /// A tub is already open; the caller must confirm a toss (or decline)
    TossPending,
}

/// Owned inventory list plus the thresholds given to new items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    items: Vec<Item>,
    defaults: Thresholds,
}

impl Ledger {
    pub fn new(defaults: Thresholds) -> Self {
        Self {
            items: Vec::new(),
            defaults,
        }
    }

    /// Wrap items loaded from a store, keeping their order
    pub fn from_items(items: Vec<Item>, defaults: Thresholds) -> Self {
        Self { items, defaults }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn defaults(&self) -> Thresholds {
        self.defaults
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Position of the item whose stored name equals `name`, ignoring case
    pub fn position_of(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_uppercase();
        self.items
            .iter()
            .position(|item| item.name.trim().to_uppercase() == wanted)
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Item> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "no item at position {} (ledger has {})",
                index, len
            ))
        })
    }

    /// Move one tub from reserve to front stock.
    pub fn promote(&mut self, index: usize) -> Result<&Item> {
        let item = self.item_mut(index)?;
        if item.reserve == 0 {
            return Err(LedgerError::precondition(&item.name, "reserve is empty"));
        }
        let stock = item
            .stock
            .checked_add_whole(1)
            .ok_or_else(|| LedgerError::precondition(&item.name, "stock is full"))?;
        item.reserve -= 1;
        item.stock = stock;
        log::info!(
            "Promoted one tub of {} (reserve {}, stock {})",
            item.name,
            item.reserve,
            item.stock.as_f64()
        );
        Ok(&*item)
    }

    /// Open a whole tub: stock drops by 0.5.
    ///
    /// Rejected when a tub is already open (that one has to be tossed or
    /// finished first) or when there is no whole tub to open.
    pub fn scoop(&mut self, index: usize) -> Result<&Item> {
        let item = self.item_mut(index)?;
        if item.stock.is_scooped() {
            return Err(LedgerError::precondition(
                &item.name,
                "a tub is already scooped; toss it instead",
            ));
        }
        if item.stock.whole() == 0 {
            return Err(LedgerError::precondition(&item.name, "no whole tub in stock"));
        }
        item.stock = Stock::new(item.stock.whole() - 1, true);
        log::info!(
            "Scooped a tub of {} (stock {})",
            item.name,
            item.stock.as_f64()
        );
        Ok(&*item)
    }

    /// Discard the open tub: stock drops by 0.5 and tossed grows by 0.5.
    pub fn toss(&mut self, index: usize) -> Result<&Item> {
        let item = self.item_mut(index)?;
        if !item.stock.is_scooped() {
            return Err(LedgerError::precondition(&item.name, "no scooped tub to toss"));
        }
        let tossed_halves = item
            .tossed_halves
            .checked_add(1)
            .ok_or_else(|| LedgerError::precondition(&item.name, "tossed counter is full"))?;
        item.stock = Stock::whole_tubs(item.stock.whole());
        item.tossed_halves = tossed_halves;
        log::info!(
            "Tossed the open tub of {} (stock {}, tossed {})",
            item.name,
            item.stock.as_f64(),
            item.tossed()
        );
        Ok(&*item)
    }

    /// Stock button semantics: scoop when nothing is open, otherwise ask for
    /// a toss without changing anything.
    pub fn tap_stock(&mut self, index: usize) -> Result<StockTap> {
        let scooped = self
            .get(index)
            .map(|item| item.stock.is_scooped())
            .unwrap_or(false);
        if scooped {
            return Ok(StockTap::TossPending);
        }
        self.scoop(index)?;
        Ok(StockTap::Scooped)
    }

    /// Add delivered tubs to the reserve. Zero is accepted and changes nothing.
    pub fn record_delivery(&mut self, index: usize, amount: i64) -> Result<&Item> {
        if amount < 0 {
            return Err(LedgerError::InvalidInput(format!(
                "delivery amount must not be negative, got {}",
                amount
            )));
        }
        let item = self.item_mut(index)?;
        let reserve = u32::try_from(amount)
            .ok()
            .and_then(|amount| item.reserve.checked_add(amount))
            .ok_or_else(|| {
                LedgerError::InvalidInput(format!("delivery of {} overflows the reserve", amount))
            })?;
        item.reserve = reserve;
        log::info!(
            "Recorded delivery of {} tub(s) of {} (reserve {})",
            amount,
            item.name,
            item.reserve
        );
        Ok(&*item)
    }

    /// Replace both thresholds. `low` and `high` are not checked against each other.
    pub fn update_thresholds(&mut self, index: usize, low: i64, high: i64) -> Result<&Item> {
        let item = self.item_mut(index)?;
        item.thresholds = Thresholds { low, high };
        log::info!("Updated thresholds of {} (low {}, high {})", item.name, low, high);
        Ok(&*item)
    }

    /// Append a new flavor and return its position.
    ///
    /// The name is trimmed and upper-cased; reserve and stock are whole tubs.
    pub fn create_item(&mut self, name: &str, reserve: i64, stock: i64) -> Result<usize> {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("item name is empty".to_string()));
        }
        let reserve = whole_tubs(reserve, "reserve")?;
        let stock = whole_tubs(stock, "stock")?;

        let item = Item::new(name, reserve, Stock::whole_tubs(stock)).with_thresholds(self.defaults);
        log::info!(
            "Created item {} (reserve {}, stock {})",
            item.name,
            reserve,
            stock
        );
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    pub fn needs_attention(&self, index: usize) -> Option<bool> {
        self.get(index).map(Item::needs_attention)
    }

    /// Items whose name contains `query` (case-insensitive), in insertion order.
    ///
    /// The query is matched as given; surrounding spaces are part of it.
    pub fn search(&self, query: &str) -> Vec<(usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(query))
            .collect()
    }

    /// Display order: items with stock first, then the rest, each group
    /// keeping insertion order.
    pub fn display_order(&self) -> Vec<(usize, &Item)> {
        partition_by_stock(self.items.iter().enumerate().collect())
    }

    /// Search results in display order
    pub fn filtered_display(&self, query: &str) -> Vec<(usize, &Item)> {
        partition_by_stock(self.search(query))
    }
}

fn partition_by_stock(entries: Vec<(usize, &Item)>) -> Vec<(usize, &Item)> {
    let (mut stocked, out_of_stock): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|(_, item)| !item.stock.is_empty());
    stocked.extend(out_of_stock);
    stocked
}

fn whole_tubs(value: i64, field: &str) -> Result<u32> {
    if value < 0 {
        return Err(LedgerError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| LedgerError::InvalidInput(format!("{} {} is too large", field, value)))
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
