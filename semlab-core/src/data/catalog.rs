//! Catalog normalization — symbol/company/sector records from decoded rows,
//! plus sector peer resolution.

use serde::{Deserialize, Serialize};

use super::decode::CsvRow;

/// Ordered alias lists for the category CSV's logical fields. The feed
/// documents `Symbol`/`Company`/`Sector`, but exports vary in header case;
/// `CsvRow::field` handles the case variants.
const SYMBOL_ALIASES: &[&str] = &["Symbol"];
const COMPANY_ALIASES: &[&str] = &["Company"];
const SECTOR_ALIASES: &[&str] = &["Sector"];

/// Peer comparisons are capped at three alongside the base symbol.
pub const MAX_PEERS: usize = 3;

/// One listed instrument from the category CSV. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub company: String,
    pub sector: String,
}

/// Ordered listing of instruments, filtered to rows with a symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<StockRecord>,
}

impl Catalog {
    /// Build a catalog from decoded category rows, preserving row order.
    ///
    /// All fields are trimmed; symbols are stored uppercased; rows whose
    /// resolved symbol is empty are dropped.
    pub fn from_rows(rows: &[CsvRow]) -> Self {
        let records = rows
            .iter()
            .filter_map(|row| {
                let symbol = row
                    .field(SYMBOL_ALIASES)
                    .unwrap_or("")
                    .trim()
                    .to_uppercase();
                if symbol.is_empty() {
                    return None;
                }
                Some(StockRecord {
                    symbol,
                    company: row.field(COMPANY_ALIASES).unwrap_or("").trim().to_string(),
                    sector: row.field(SECTOR_ALIASES).unwrap_or("").trim().to_string(),
                })
            })
            .collect();
        Self { records }
    }

    /// Look up a record by (uppercased) symbol.
    pub fn get(&self, symbol: &str) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.symbol == symbol)
    }

    /// Same-sector peers of `base`, in catalog order, at most [`MAX_PEERS`].
    ///
    /// An unknown base yields no peers.
    pub fn peers(&self, base: &str) -> Vec<&str> {
        let Some(record) = self.get(base) else {
            return Vec::new();
        };
        self.records
            .iter()
            .filter(|r| r.symbol != record.symbol && r.sector == record.sector)
            .take(MAX_PEERS)
            .map(|r| r.symbol.as_str())
            .collect()
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
