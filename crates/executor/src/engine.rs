use crate::error::Rejection;
use crate::execution::Execution;
use core_types::{Account, Command};
use rust_decimal::Decimal;
use stock_table::StockTable;
use tracing::debug;

/// Applies commands to the stock table and the account.
///
/// Every operation checks all of its preconditions before touching any state, so a
/// returned `Rejection` always means the table and budget are exactly as they were.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    table: StockTable,
    account: Account,
}

impl CommandEngine {
    pub fn new(table: StockTable, account: Account) -> Self {
        Self { table, account }
    }

    /// Dispatches a parsed command to the matching operation.
    pub fn execute(&mut self, command: &Command) -> Result<Execution, Rejection> {
        match command {
            Command::Buy { symbol, quantity } => self.buy(symbol, *quantity),
            Command::Sell { symbol, quantity } => self.sell(symbol, *quantity),
            Command::Query { symbol } => self.query(symbol),
            Command::Price { symbol, price } => self.update_price(symbol, *price),
            Command::Unknown => Err(Rejection::Unrecognized),
        }
    }

    /// Buys `quantity` shares of `symbol` at its current price.
    pub fn buy(&mut self, symbol: &str, quantity: i64) -> Result<Execution, Rejection> {
        let entry = self
            .table
            .lookup_mut(symbol)
            .ok_or_else(|| Rejection::UnknownSymbol(symbol.to_string()))?;
        let quantity = positive_quantity(quantity)?;

        let cost = entry
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| Rejection::Overflow(symbol.to_string()))?;
        if cost > self.account.budget {
            return Err(Rejection::InsufficientFunds {
                required: cost,
                available: self.account.budget,
            });
        }
        let shares_owned = entry
            .shares_owned
            .checked_add(quantity)
            .ok_or_else(|| Rejection::Overflow(symbol.to_string()))?;

        self.account.budget -= cost;
        entry.shares_owned = shares_owned;

        debug!(symbol, quantity, %cost, budget = %self.account.budget, "Bought shares");
        Ok(Execution::Bought {
            symbol: symbol.to_string(),
            quantity,
            price: entry.price,
            cost,
        })
    }

    /// Sells `quantity` owned shares of `symbol` at its current price.
    pub fn sell(&mut self, symbol: &str, quantity: i64) -> Result<Execution, Rejection> {
        let entry = self
            .table
            .lookup_mut(symbol)
            .ok_or_else(|| Rejection::UnknownSymbol(symbol.to_string()))?;
        let quantity = positive_quantity(quantity)?;

        if quantity > entry.shares_owned {
            return Err(Rejection::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                owned: entry.shares_owned,
            });
        }
        let proceeds = entry
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| Rejection::Overflow(symbol.to_string()))?;
        let budget = self
            .account
            .budget
            .checked_add(proceeds)
            .ok_or_else(|| Rejection::Overflow(symbol.to_string()))?;

        entry.shares_owned -= quantity;
        self.account.budget = budget;

        debug!(symbol, quantity, %proceeds, budget = %self.account.budget, "Sold shares");
        Ok(Execution::Sold {
            symbol: symbol.to_string(),
            quantity,
            price: entry.price,
            proceeds,
        })
    }

    /// Compares the current price of `symbol` against the threshold. Never mutates.
    pub fn query(&self, symbol: &str) -> Result<Execution, Rejection> {
        let entry = self
            .table
            .lookup(symbol)
            .ok_or_else(|| Rejection::UnknownSymbol(symbol.to_string()))?;

        let below_threshold = entry.price <= self.account.threshold;
        debug!(symbol, price = %entry.price, below_threshold, "Queried price");
        Ok(Execution::Queried {
            symbol: symbol.to_string(),
            price: entry.price,
            threshold: self.account.threshold,
            below_threshold,
        })
    }

    /// Sets a new price for `symbol`. Share counts and budget are unaffected.
    pub fn update_price(&mut self, symbol: &str, price: Decimal) -> Result<Execution, Rejection> {
        let entry = self
            .table
            .lookup_mut(symbol)
            .ok_or_else(|| Rejection::UnknownSymbol(symbol.to_string()))?;
        if price < Decimal::ZERO {
            return Err(Rejection::NegativePrice(price));
        }

        let old_price = std::mem::replace(&mut entry.price, price);
        debug!(symbol, %old_price, new_price = %price, "Updated price");
        Ok(Execution::PriceUpdated {
            symbol: symbol.to_string(),
            old_price,
            new_price: price,
        })
    }

    pub fn table(&self) -> &StockTable {
        &self.table
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn budget(&self) -> Decimal {
        self.account.budget
    }

    pub fn threshold(&self) -> Decimal {
        self.account.threshold
    }

    pub fn into_parts(self) -> (StockTable, Account) {
        (self.table, self.account)
    }
}

fn positive_quantity(quantity: i64) -> Result<u64, Rejection> {
    if quantity <= 0 {
        return Err(Rejection::NonPositiveQuantity(quantity));
    }
    Ok(quantity as u64)
}
