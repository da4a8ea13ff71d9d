pub mod command;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use command::Command;
pub use enums::CommandKind;
pub use error::CoreError;
pub use structs::{Account, StockEntry};
