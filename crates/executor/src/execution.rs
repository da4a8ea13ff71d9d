use core_types::CommandKind;
use rust_decimal::Decimal;
use serde::Serialize;

/// The effect of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Execution {
    Bought {
        symbol: String,
        quantity: u64,
        price: Decimal,
        cost: Decimal,
    },
    Sold {
        symbol: String,
        quantity: u64,
        price: Decimal,
        proceeds: Decimal,
    },
    Queried {
        symbol: String,
        price: Decimal,
        threshold: Decimal,
        below_threshold: bool,
    },
    PriceUpdated {
        symbol: String,
        old_price: Decimal,
        new_price: Decimal,
    },
}

impl Execution {
    pub fn kind(&self) -> CommandKind {
        match self {
            Execution::Bought { .. } => CommandKind::Buy,
            Execution::Sold { .. } => CommandKind::Sell,
            Execution::Queried { .. } => CommandKind::Query,
            Execution::PriceUpdated { .. } => CommandKind::Price,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Execution::Bought { symbol, .. }
            | Execution::Sold { symbol, .. }
            | Execution::Queried { symbol, .. }
            | Execution::PriceUpdated { symbol, .. } => symbol,
        }
    }

    /// True when the command changed the table or the budget. Only these go to the
    /// execution log.
    pub fn mutates_state(&self) -> bool {
        self.kind().is_mutating()
    }

    /// Signed change to the budget caused by this execution.
    pub fn cash_delta(&self) -> Decimal {
        match self {
            Execution::Bought { cost, .. } => -*cost,
            Execution::Sold { proceeds, .. } => *proceeds,
            Execution::Queried { .. } | Execution::PriceUpdated { .. } => Decimal::ZERO,
        }
    }
}
