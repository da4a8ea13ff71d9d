//! # HFT Executor Crate
//!
//! This crate applies parsed commands to the simulation state. It owns the stock table
//! and the account, and is the only place where budget and share counts change.
//!
//! ## Architectural Principles
//!
//! - **Explicit State:** The `CommandEngine` holds the table and the account as plain
//!   fields. There is no global state; callers pass the engine around by reference.
//! - **Tagged Results:** Every operation returns `Result<Execution, Rejection>`. A
//!   rejection names the exact precondition that failed and guarantees that nothing
//!   was mutated.
//!
//! ## Public API
//!
//! - `CommandEngine`: Buy, sell, query and price-update operations.
//! - `Execution`: What a successful command did.
//! - `Rejection`: Why a command was not applied.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod execution;

// Re-export the key components to provide a clean, public-facing API.
pub use engine::CommandEngine;
pub use error::Rejection;
pub use execution::Execution;
