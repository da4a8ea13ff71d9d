//! # HFT Analytics
//!
//! This crate turns the final simulation state into a human-readable portfolio report.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** The generator only reads the stock table and the account. It has no
//!   knowledge of files or the console; callers hand it any `std::io::Write` sink.
//! - **Deterministic Output:** Positions are listed in symbol order, so rendering the same
//!   state twice produces byte-identical text regardless of the table's bucket layout.
//!
//! ## Public API
//!
//! - `ReportGenerator`: Builds a `PortfolioReport` and writes it to a sink.
//! - `PortfolioReport`: Per-symbol positions plus equity totals.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod generator;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use error::AnalyticsError;
pub use generator::ReportGenerator;
pub use report::{PortfolioReport, PositionLine};
