use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single row of the stock table: a symbol, its current price and the shares we hold.
///
/// The symbol is the table key and cannot change once the entry exists. Price and
/// share count are mutated in place by the command engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    symbol: String,
    /// Current price per share. Never negative.
    pub price: Decimal,
    /// Number of shares currently owned.
    pub shares_owned: u64,
}

impl StockEntry {
    /// Creates a validated entry. The symbol must be non-empty and free of whitespace,
    /// and the price must not be negative.
    pub fn new(symbol: impl Into<String>, price: Decimal, shares_owned: u64) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        validate_symbol(&symbol)?;
        if price < Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("{} has negative price {}", symbol, price),
            ));
        }
        Ok(Self {
            symbol,
            price,
            shares_owned,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Market value of the position: `price * shares_owned`.
    pub fn position_value(&self) -> Decimal {
        self.price * Decimal::from(self.shares_owned)
    }
}

/// Checks that a symbol can be used as a table key and as a single command token.
pub fn validate_symbol(symbol: &str) -> Result<(), CoreError> {
    if symbol.is_empty() {
        return Err(CoreError::InvalidInput(
            "symbol".to_string(),
            "symbol must not be empty".to_string(),
        ));
    }
    if symbol.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidInput(
            "symbol".to_string(),
            format!("'{}' contains whitespace", symbol),
        ));
    }
    Ok(())
}

/// Cash side of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Starting budget, kept for the final delta.
    pub original_budget: Decimal,
    /// Cash currently available for buying.
    pub budget: Decimal,
    /// Price level used by `query`: a price at or below it is reported as under threshold.
    pub threshold: Decimal,
}

impl Account {
    pub fn new(budget: Decimal, threshold: Decimal) -> Self {
        Self {
            original_budget: budget,
            budget,
            threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stock_entry_position_value() {
        let entry = StockEntry::new("AAPL", dec!(10.5), 4).unwrap();
        assert_eq!(entry.symbol(), "AAPL");
        assert_eq!(entry.position_value(), dec!(42));
    }

    #[test]
    fn test_stock_entry_rejects_bad_input() {
        assert!(StockEntry::new("", dec!(1), 0).is_err());
        assert!(StockEntry::new("BR K", dec!(1), 0).is_err());
        assert!(StockEntry::new("MSFT", dec!(-0.01), 0).is_err());
        assert!(StockEntry::new("MSFT", Decimal::ZERO, 0).is_ok());
    }

    #[test]
    fn test_account_snapshots_original_budget() {
        let mut account = Account::new(dec!(100), dec!(12));
        account.budget -= dec!(40);
        assert_eq!(account.original_budget, dec!(100));
        assert_eq!(account.budget, dec!(60));
    }
}
