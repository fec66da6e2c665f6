//! Item model: one flavor with its tub counts and attention thresholds

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Marker some sheet rows carry in their name; never shown to the user.
const ACTIVE_TAG: &str = "(Active)";

/// Default attention thresholds for newly created items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// At or below this total the item needs attention
    pub low: i64,
    /// Healthy level; stored and shown, never used in a computation
    pub high: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low: 1, high: 5 }
    }
}

/// Front stock of one flavor.
///
/// `whole` counts unopened tubs; `scooped` marks the single opened tub.
/// Numerically this is `whole + 0.5` when scooped, which is how stores
/// write it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stock {
    whole: u32,
    scooped: bool,
}

impl Stock {
    pub fn new(whole: u32, scooped: bool) -> Self {
        Self { whole, scooped }
    }

    /// Stock of `whole` unopened tubs and no opened one
    pub fn whole_tubs(whole: u32) -> Self {
        Self::new(whole, false)
    }

    pub fn whole(&self) -> u32 {
        self.whole
    }

    pub fn is_scooped(&self) -> bool {
        self.scooped
    }

    pub fn is_empty(&self) -> bool {
        self.whole == 0 && !self.scooped
    }

    /// Stock in half-tub units
    pub fn halves(&self) -> u64 {
        u64::from(self.whole) * 2 + u64::from(self.scooped)
    }

    pub fn as_f64(&self) -> f64 {
        self.halves() as f64 / 2.0
    }

    /// Parse the numeric form (`2`, `2.5`, ...) used by sheets and tables.
    pub fn from_f64(value: f64) -> Result<Self> {
        let halves = half_units(value, "stock")?;
        let whole = u32::try_from(halves / 2)
            .map_err(|_| LedgerError::InvalidInput(format!("stock {} is too large", value)))?;
        Ok(Self::new(whole, halves % 2 == 1))
    }

    pub(crate) fn checked_add_whole(self, tubs: u32) -> Option<Self> {
        Some(Self::new(self.whole.checked_add(tubs)?, self.scooped))
    }
}

/// Convert a non-negative multiple of 0.5 into a count of halves.
pub(crate) fn half_units(value: f64, field: &str) -> Result<u64> {
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    let halves = value * 2.0;
    if halves.fract() != 0.0 {
        return Err(LedgerError::InvalidInput(format!(
            "{} must be a multiple of 0.5, got {}",
            field, value
        )));
    }
    if halves > u64::MAX as f64 {
        return Err(LedgerError::InvalidInput(format!(
            "{} {} is too large",
            field, value
        )));
    }
    Ok(halves as u64)
}

/// One flavor in the ledger.
///
/// Serializes as the flat sheet record `name, reserve, stock, tossed, low, high`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    pub(crate) name: String,
    pub(crate) reserve: u32,
    pub(crate) stock: Stock,
    pub(crate) tossed_halves: u64,
    pub(crate) thresholds: Thresholds,
}

impl Item {
    /// Build an item as a store would hand it over: name kept verbatim,
    /// nothing tossed yet, default thresholds.
    pub fn new(name: impl Into<String>, reserve: u32, stock: Stock) -> Self {
        Self {
            name: name.into(),
            reserve,
            stock,
            tossed_halves: 0,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_tossed_halves(mut self, tossed_halves: u64) -> Self {
        self.tossed_halves = tossed_halves;
        self
    }

    /// Stored name, including any `(Active)` tag
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as shown in lists: `(Active)` removed, surrounding space trimmed
    pub fn display_name(&self) -> String {
        self.name.replace(ACTIVE_TAG, "").trim().to_string()
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }

    /// Tossed tubs so far (multiples of 0.5)
    pub fn tossed(&self) -> f64 {
        self.tossed_halves as f64 / 2.0
    }

    pub fn tossed_halves(&self) -> u64 {
        self.tossed_halves
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn low(&self) -> i64 {
        self.thresholds.low
    }

    pub fn high(&self) -> i64 {
        self.thresholds.high
    }

    /// Reserve plus stock in half-tub units
    pub fn total_halves(&self) -> u64 {
        u64::from(self.reserve) * 2 + self.stock.halves()
    }

    /// Reserve plus stock; may carry a 0.5 fraction
    pub fn total(&self) -> f64 {
        self.total_halves() as f64 / 2.0
    }

    /// Total as shown in the list view (fraction dropped)
    pub fn display_total(&self) -> u64 {
        self.total_halves() / 2
    }

    /// True when the total is at or below `low`, or the reserve is empty.
    pub fn needs_attention(&self) -> bool {
        let at_or_below_low = i128::from(self.total_halves()) <= i128::from(self.low()) * 2;
        at_or_below_low || self.reserve == 0
    }

    /// Case-insensitive substring match on the stored name; empty matches all.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_uppercase().contains(&query.to_uppercase())
    }

    pub fn detail(&self) -> ItemDetail {
        ItemDetail {
            name: self.display_name(),
            reserve: self.reserve,
            stock: self.stock.as_f64(),
            tossed: self.tossed(),
            total: self.total(),
            low: self.low(),
            high: self.high(),
            needs_attention: self.needs_attention(),
        }
    }
}

/// Everything the detail view shows for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub name: String,
    pub reserve: u32,
    pub stock: f64,
    pub tossed: f64,
    pub total: f64,
    pub low: i64,
    pub high: i64,
    pub needs_attention: bool,
}

fn default_low() -> i64 {
    Thresholds::default().low
}

fn default_high() -> i64 {
    Thresholds::default().high
}

/// Flat record layout shared by every store.
///
/// Quantities are plain numbers so a sheet can hold them as written;
/// converting into an [`Item`] validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub reserve: f64,
    pub stock: f64,
    #[serde(default)]
    pub tossed: f64,
    #[serde(default = "default_low")]
    pub low: i64,
    #[serde(default = "default_high")]
    pub high: i64,
}

impl ItemRecord {
    /// Column order used by sheets and tables
    pub const HEADERS: [&'static str; 6] = ["name", "reserve", "stock", "tossed", "low", "high"];
}

impl TryFrom<ItemRecord> for Item {
    type Error = LedgerError;

    fn try_from(record: ItemRecord) -> Result<Self> {
        if record.name.trim().is_empty() {
            return Err(LedgerError::InvalidInput("item name is empty".to_string()));
        }
        let reserve_halves = half_units(record.reserve, "reserve")?;
        if reserve_halves % 2 != 0 {
            return Err(LedgerError::InvalidInput(format!(
                "reserve must be whole tubs, got {}",
                record.reserve
            )));
        }
        let reserve = u32::try_from(reserve_halves / 2).map_err(|_| {
            LedgerError::InvalidInput(format!("reserve {} is too large", record.reserve))
        })?;

        Ok(Item {
            name: record.name,
            reserve,
            stock: Stock::from_f64(record.stock)?,
            tossed_halves: half_units(record.tossed, "tossed")?,
            thresholds: Thresholds {
                low: record.low,
                high: record.high,
            },
        })
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        ItemRecord {
            reserve: f64::from(item.reserve),
            stock: item.stock.as_f64(),
            tossed: item.tossed(),
            low: item.thresholds.low,
            high: item.thresholds.high,
            name: item.name,
        }
    }
}
