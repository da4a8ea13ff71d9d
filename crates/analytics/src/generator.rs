use crate::error::AnalyticsError;
use crate::report::{PortfolioReport, PositionLine};
use core_types::Account;
use rust_decimal::Decimal;
use std::io::Write;
use stock_table::StockTable;
use tracing::debug;

/// A stateless renderer for the end-of-run portfolio summary.
#[derive(Debug, Default)]
pub struct ReportGenerator {}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the report from the current table and account. Reads only.
    pub fn generate(
        &self,
        table: &StockTable,
        account: &Account,
    ) -> Result<PortfolioReport, AnalyticsError> {
        let mut positions = Vec::with_capacity(table.len());
        let mut overflowed = None;

        table.for_each(|entry| {
            match entry.price.checked_mul(Decimal::from(entry.shares_owned)) {
                Some(position_value) => positions.push(PositionLine {
                    symbol: entry.symbol().to_string(),
                    price: entry.price,
                    shares_owned: entry.shares_owned,
                    position_value,
                }),
                None => overflowed = Some(entry.symbol().to_string()),
            }
        });
        if let Some(symbol) = overflowed {
            return Err(AnalyticsError::Calculation(format!(
                "position value overflows for {}",
                symbol
            )));
        }
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let holdings_value = positions
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.position_value))
            .ok_or_else(|| AnalyticsError::Calculation("holdings value overflows".to_string()))?;
        let total_equity = holdings_value
            .checked_add(account.budget)
            .ok_or_else(|| AnalyticsError::Calculation("total equity overflows".to_string()))?;
        let delta = total_equity
            .checked_sub(account.original_budget)
            .ok_or_else(|| AnalyticsError::Calculation("delta overflows".to_string()))?;

        debug!(positions = positions.len(), %total_equity, %delta, "Generated portfolio report");
        Ok(PortfolioReport {
            positions,
            holdings_value,
            original_budget: account.original_budget,
            budget: account.budget,
            threshold: account.threshold,
            total_equity,
            delta,
        })
    }

    /// Generates the report and writes its text form to `sink`.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        table: &StockTable,
        account: &Account,
        sink: &mut W,
    ) -> Result<PortfolioReport, AnalyticsError> {
        let report = self.generate(table, account)?;
        write!(sink, "{}", report)?;
        sink.flush()?;
        Ok(report)
    }
}
