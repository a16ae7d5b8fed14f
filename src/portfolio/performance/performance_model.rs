use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::positions::Position;
use crate::transactions::Transaction;

/// Input bundle for the return calculator. Records must be pre-filtered to
/// the target account by the data-access layer.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceInput<'a> {
    pub positions: &'a [Position],
    pub transactions: &'a [Transaction],
}

/// One sub-period of the time-weighted return series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyReturn {
    pub date: NaiveDate,
    pub beginning_value: Decimal,
    pub ending_value: Decimal,
    /// Signed external flow total for the day
    pub net_flows: Decimal,
    pub daily_return: Decimal,
    /// Geometrically chain-linked return since the start of the series
    pub cumulative_return: Decimal,
}

/// Period summary statistics derived from a daily return series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TwrSummary {
    /// Chain-linked total return over the period, in percent
    pub total_return_percent: Decimal,
    pub annualized_twr: Decimal,
    /// Annualized sample standard deviation of daily returns
    pub volatility: Decimal,
    pub sharpe_ratio: Decimal,
    /// Largest peak-to-trough decline of the growth series
    pub max_drawdown: Decimal,
    /// Number of daily sub-periods in the series
    pub periods: usize,
}

impl TwrSummary {
    /// Zero-valued summary for series too short to measure.
    pub fn insufficient_data(periods: usize) -> Self {
        Self {
            total_return_percent: Decimal::ZERO,
            annualized_twr: Decimal::ZERO,
            volatility: Decimal::ZERO,
            sharpe_ratio: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
            periods,
        }
    }
}
