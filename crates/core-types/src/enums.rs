use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation a parsed input line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    Buy,
    Sell,
    Query,
    Price,
    Unknown,
}

impl CommandKind {
    /// Resolves a command keyword, ignoring ASCII case.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "buy" => CommandKind::Buy,
            "sell" => CommandKind::Sell,
            "query" => CommandKind::Query,
            "price" => CommandKind::Price,
            _ => CommandKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Buy => "buy",
            CommandKind::Sell => "sell",
            CommandKind::Query => "query",
            CommandKind::Price => "price",
            CommandKind::Unknown => "unknown",
        }
    }

    /// Whether a successful command of this kind changes the table or the budget.
    pub fn is_mutating(&self) -> bool {
        matches!(self, CommandKind::Buy | CommandKind::Sell | CommandKind::Price)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
