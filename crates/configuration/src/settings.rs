use crate::error::ConfigError;
use core_types::{Account, StockEntry};
use rust_decimal::Decimal;
use serde::Deserialize;
use stock_table::StockTable;

/// The root configuration structure for a simulation run.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub account: AccountSettings,
    #[serde(default)]
    pub table: TableSettings,
    /// Initial rows of the stock table. Later rows overwrite earlier ones with the same symbol.
    #[serde(default)]
    pub stocks: Vec<StockListing>,
}

/// Starting cash and the query threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    /// The cash available at the start of the run.
    pub budget: Decimal,
    /// Prices at or below this level are reported as under threshold by `query`.
    pub threshold: Decimal,
}

/// Sizing of the stock table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    /// Number of hash buckets to allocate.
    pub capacity: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self { capacity: 10_000 }
    }
}

/// A single `[[stocks]]` row.
#[derive(Debug, Clone, Deserialize)]
pub struct StockListing {
    pub symbol: String,
    pub price: Decimal,
    #[serde(default)]
    pub shares: u64,
}

impl Settings {
    /// Checks the values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account.budget < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "budget must not be negative, got {}",
                self.account.budget
            )));
        }
        if self.account.threshold < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "threshold must not be negative, got {}",
                self.account.threshold
            )));
        }
        for listing in &self.stocks {
            listing.to_entry()?;
        }
        Ok(())
    }

    /// Builds the populated stock table and the account the run starts from.
    pub fn into_parts(self) -> Result<(StockTable, Account), ConfigError> {
        self.validate()?;

        let mut table = StockTable::new(self.table.capacity);
        for listing in &self.stocks {
            table.insert_or_update(listing.to_entry()?);
        }

        let account = Account::new(self.account.budget, self.account.threshold);
        Ok((table, account))
    }
}

impl StockListing {
    pub fn to_entry(&self) -> Result<StockEntry, ConfigError> {
        Ok(StockEntry::new(self.symbol.clone(), self.price, self.shares)?)
    }
}
