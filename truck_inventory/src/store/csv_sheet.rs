//! CSV sheet store
//!
//! The sheet has one row per flavor with the columns
//! `name,reserve,stock,tossed,low,high`, the layout the truck's spreadsheet
//! already used.

use super::ItemStore;
use crate::error::Result;
use scoop_ledger::{Item, ItemRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// Flavor list kept in a CSV file
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the sheet, failing when the file does not exist.
    ///
    /// Unlike [`ItemStore::load`], a missing file is an error here: an import
    /// from a mistyped path must not look like an empty sheet.
    pub fn read_existing(&self) -> Result<Vec<Item>> {
        fs::metadata(&self.path)?;
        read_sheet(&self.path)
    }

    /// Sibling file the next write goes to before it replaces the sheet
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Read every item from a sheet
fn read_sheet(path: &Path) -> Result<Vec<Item>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut items = Vec::new();
    for result in rdr.deserialize() {
        let item: Item = result?;
        items.push(item);
    }
    Ok(items)
}

/// Write `items` to `path`, header first, replacing whatever was there
fn write_sheet(path: &Path, items: &[Item]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(ItemRecord::HEADERS)?;
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

impl ItemStore for CsvStore {
    fn load(&mut self) -> Result<Vec<Item>> {
        if !self.path.exists() {
            log::info!(
                "Sheet {} does not exist yet, starting empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }
        let items = read_sheet(&self.path)?;
        log::debug!("Loaded {} items from {}", items.len(), self.path.display());
        Ok(items)
    }

    fn replace_all(&mut self, items: &[Item]) -> Result<()> {
        let staging = self.staging_path();
        if let Err(e) = write_sheet(&staging, items) {
            fs::remove_file(&staging).ok();
            return Err(e);
        }
        fs::rename(&staging, &self.path)?;
        log::debug!(
            "Replaced {} with {} items",
            self.path.display(),
            items.len()
        );
        Ok(())
    }
}
