use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionLine {
    pub symbol: String,
    pub price: Decimal,
    pub shares_owned: u64,
    /// `price * shares_owned`
    pub position_value: Decimal,
}

/// The end-of-run snapshot of the portfolio.
///
/// This struct is the output of the `ReportGenerator`; its `Display` implementation is
/// the exact text written to the output file and echoed to the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Sorted by symbol.
    pub positions: Vec<PositionLine>,
    pub holdings_value: Decimal,
    pub original_budget: Decimal,
    pub budget: Decimal,
    pub threshold: Decimal,
    /// Holdings value plus remaining budget.
    pub total_equity: Decimal,
    /// Total equity minus the original budget.
    pub delta: Decimal,
}

impl PortfolioReport {
    fn positions_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_header(vec!["Symbol", "Price", "Shares", "Position Value"]);

        // Prices keep their own scale; only money amounts are rounded to cents.
        for line in &self.positions {
            table.add_row(vec![
                Cell::new(&line.symbol),
                Cell::new(line.price).set_alignment(CellAlignment::Right),
                Cell::new(line.shares_owned).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", line.position_value)).set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }
}

impl fmt::Display for PortfolioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.positions_table())?;
        writeln!(f, "{:<17}{:.2}", "Holdings value:", self.holdings_value)?;
        writeln!(f, "{:<17}{:.2}", "Original budget:", self.original_budget)?;
        writeln!(f, "{:<17}{:.2}", "Current budget:", self.budget)?;
        writeln!(f, "{:<17}{:.2}", "Threshold:", self.threshold)?;
        writeln!(f, "{:<17}{:.2}", "Total equity:", self.total_equity)?;
        writeln!(f, "{:<17}{:.2}", "Delta:", self.delta)
    }
}
