use rust_decimal::Decimal;
use thiserror::Error;

/// Why a command was not applied. A rejected command leaves all state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    #[error("Not enough budget to execute trade. Required: {required}, Available: {available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("Not enough shares of {symbol} to sell. Requested: {requested}, Owned: {owned}")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        owned: u64,
    },

    #[error("Price must not be negative, got {0}")]
    NegativePrice(Decimal),

    #[error("Arithmetic overflow while executing command for {0}")]
    Overflow(String),

    #[error("Unrecognized command")]
    Unrecognized,
}
