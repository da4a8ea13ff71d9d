//! # HFT Stock Table
//!
//! A keyed store of `StockEntry` values. The table is a separate-chaining hash table
//! whose bucket count is fixed when it is created; chains grow as needed, so inserts
//! never fail even past the nominal capacity.
//!
//! ## Public API
//!
//! - `StockTable`: symbol-keyed storage with insert-or-update, lookup and traversal.

pub mod table;

pub use table::StockTable;
