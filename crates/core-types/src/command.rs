use crate::enums::CommandKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One parsed input line.
///
/// Quantities are kept signed so that `buy AAPL -3` still parses and the engine can
/// reject it with a specific reason instead of the line silently vanishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Buy { symbol: String, quantity: i64 },
    Sell { symbol: String, quantity: i64 },
    Query { symbol: String },
    Price { symbol: String, price: Decimal },
    Unknown,
}

impl Command {
    /// Parses a line of the form `<keyword> <symbol> [<argument>]`.
    ///
    /// Anything that does not match a known form (wrong token count, unparsable number,
    /// unknown keyword, blank line) becomes `Command::Unknown`.
    pub fn parse(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, args)) = tokens.split_first() else {
            return Command::Unknown;
        };

        match (CommandKind::from_keyword(keyword), args) {
            (CommandKind::Buy, [symbol, quantity]) => match quantity.parse::<i64>() {
                Ok(quantity) => Command::Buy {
                    symbol: symbol.to_string(),
                    quantity,
                },
                Err(_) => Command::Unknown,
            },
            (CommandKind::Sell, [symbol, quantity]) => match quantity.parse::<i64>() {
                Ok(quantity) => Command::Sell {
                    symbol: symbol.to_string(),
                    quantity,
                },
                Err(_) => Command::Unknown,
            },
            (CommandKind::Query, [symbol]) => Command::Query {
                symbol: symbol.to_string(),
            },
            (CommandKind::Price, [symbol, price]) => match Decimal::from_str(price) {
                Ok(price) => Command::Price {
                    symbol: symbol.to_string(),
                    price,
                },
                Err(_) => Command::Unknown,
            },
            _ => Command::Unknown,
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Buy { .. } => CommandKind::Buy,
            Command::Sell { .. } => CommandKind::Sell,
            Command::Query { .. } => CommandKind::Query,
            Command::Price { .. } => CommandKind::Price,
            Command::Unknown => CommandKind::Unknown,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Command::Buy { symbol, .. }
            | Command::Sell { symbol, .. }
            | Command::Query { symbol }
            | Command::Price { symbol, .. } => Some(symbol),
            Command::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Command::Unknown)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Buy { symbol, quantity } | Command::Sell { symbol, quantity } => {
                write!(f, "{} {} {}", self.kind(), symbol, quantity)
            }
            Command::Query { symbol } => write!(f, "query {}", symbol),
            Command::Price { symbol, price } => write!(f, "price {} {}", symbol, price),
            Command::Unknown => f.write_str("unknown"),
        }
    }
}
