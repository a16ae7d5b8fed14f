use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetClass, Security};
use crate::positions::Position;
use crate::quotes::Price;

/// Input bundle for the holdings aggregator. Positions must be pre-filtered
/// to the target account by the data-access layer.
#[derive(Debug, Clone, Copy)]
pub struct HoldingsInput<'a> {
    pub positions: &'a [Position],
    pub prices: &'a [Price],
    pub securities: &'a [Security],
}

/// One valued holding as of the report date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub security_name: Option<String>,
    pub asset_class: AssetClass,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub market_value: Decimal,
    pub allocation_percent: Decimal,
    pub unrealized_pnl: Option<Decimal>,
    /// No close was available on or before the report date; the valuation
    /// fell back to average cost
    pub stale_price: bool,
}

/// Market value and count per asset class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassBreakdown {
    pub asset_class: AssetClass,
    pub market_value: Decimal,
    pub holding_count: usize,
    pub percent_of_total: Decimal,
}

/// Portfolio-level totals for a holdings report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsSummary {
    pub total_market_value: Decimal,
    pub total_unrealized_pnl: Decimal,
    pub holding_count: usize,
    pub stale_price_count: usize,
}

impl HoldingsSummary {
    pub fn zero() -> Self {
        Self {
            total_market_value: Decimal::ZERO,
            total_unrealized_pnl: Decimal::ZERO,
            holding_count: 0,
            stale_price_count: 0,
        }
    }
}

/// Output of the holdings aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsReport {
    pub account_id: String,
    pub as_of_date: NaiveDate,
    pub holdings: Vec<Holding>,
    pub asset_classes: Vec<AssetClassBreakdown>,
    pub summary: HoldingsSummary,
}
