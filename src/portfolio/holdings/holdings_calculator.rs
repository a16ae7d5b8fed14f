//! Holdings aggregation: joins position snapshots to latest prices and
//! security reference data, then derives market values, unrealized P&L and
//! allocation weights.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::assets::{AssetClass, Security};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::positions::{snapshot_as_of, Position};
use crate::quotes::latest_close_on_or_before;

use super::holdings_model::{
    AssetClassBreakdown, Holding, HoldingsInput, HoldingsReport, HoldingsSummary,
};

const CASH_SYMBOL: &str = "CASH";

/// Computes the valued holdings of one account as of a date.
///
/// Price resolution uses the latest close on or before `as_of_date`; a
/// holding with no available close falls back to its average cost and is
/// flagged `stale_price` rather than failing the whole report. An empty
/// position set yields an empty report, not an error.
pub fn compute_holdings(
    account_id: &str,
    as_of_date: NaiveDate,
    input: &HoldingsInput,
) -> Result<HoldingsReport> {
    let securities_by_id: HashMap<&str, &Security> = input
        .securities
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();

    let snapshot = snapshot_as_of(input.positions, as_of_date);

    let mut holdings = Vec::with_capacity(snapshot.len());
    for position in snapshot {
        if let Some(quantity) = position.quantity {
            if quantity.is_zero() {
                continue;
            }
        }

        let holding = match &position.security_id {
            None => Holding {
                symbol: CASH_SYMBOL.to_string(),
                security_name: None,
                asset_class: AssetClass::Cash,
                quantity: None,
                price: None,
                market_value: position.market_value,
                allocation_percent: Decimal::ZERO,
                unrealized_pnl: None,
                stale_price: false,
            },
            Some(security_id) => {
                value_security_position(position, security_id, &securities_by_id, input, as_of_date)
            }
        };
        holdings.push(holding);
    }

    let total_market_value: Decimal = holdings.iter().map(|h| h.market_value).sum();

    // Allocation weights; everything stays zero when the portfolio is empty
    if total_market_value > Decimal::ZERO {
        for holding in &mut holdings {
            holding.allocation_percent = (holding.market_value / total_market_value * dec!(100))
                .round_dp(DECIMAL_PRECISION);
        }
    }

    let asset_classes = asset_class_breakdown(&holdings, total_market_value);

    let summary = HoldingsSummary {
        total_market_value: total_market_value.round_dp(DECIMAL_PRECISION),
        total_unrealized_pnl: holdings
            .iter()
            .filter_map(|h| h.unrealized_pnl)
            .sum::<Decimal>()
            .round_dp(DECIMAL_PRECISION),
        holding_count: holdings.len(),
        stale_price_count: holdings.iter().filter(|h| h.stale_price).count(),
    };

    Ok(HoldingsReport {
        account_id: account_id.to_string(),
        as_of_date,
        holdings,
        asset_classes,
        summary,
    })
}

fn value_security_position(
    position: &Position,
    security_id: &str,
    securities_by_id: &HashMap<&str, &Security>,
    input: &HoldingsInput,
    as_of_date: NaiveDate,
) -> Holding {
    let security = securities_by_id.get(security_id).copied();
    if security.is_none() {
        warn!(
            "No security reference data for {}; reporting under its raw id.",
            security_id
        );
    }

    let (symbol, security_name, asset_class) = match security {
        Some(s) => (s.symbol.clone(), s.name.clone(), s.asset_class),
        None => (security_id.to_string(), None, AssetClass::Other),
    };

    let latest_close = latest_close_on_or_before(input.prices, security_id, as_of_date);

    let (price, stale_price) = match latest_close {
        Some(quote) => (Some(quote.close), false),
        None => {
            debug!(
                "No close for {} on or before {}; falling back to average cost.",
                security_id, as_of_date
            );
            (position.average_cost, true)
        }
    };

    let market_value = match (position.quantity, price) {
        (Some(quantity), Some(price)) => {
            (quantity * price).round_dp(DECIMAL_PRECISION)
        }
        // Cash-like security row carrying only a stored value
        _ => position.market_value,
    };

    let unrealized_pnl = match (position.quantity, position.average_cost) {
        (Some(quantity), Some(average_cost)) => {
            Some((market_value - quantity * average_cost).round_dp(DECIMAL_PRECISION))
        }
        _ => None,
    };

    Holding {
        symbol,
        security_name,
        asset_class,
        quantity: position.quantity,
        price,
        market_value,
        allocation_percent: Decimal::ZERO,
        unrealized_pnl,
        stale_price,
    }
}

fn asset_class_breakdown(
    holdings: &[Holding],
    total_market_value: Decimal,
) -> Vec<AssetClassBreakdown> {
    let mut grouped: HashMap<AssetClass, (Decimal, usize)> = HashMap::new();
    for holding in holdings {
        let entry = grouped
            .entry(holding.asset_class)
            .or_insert((Decimal::ZERO, 0));
        entry.0 += holding.market_value;
        entry.1 += 1;
    }

    let mut breakdown: Vec<AssetClassBreakdown> = grouped
        .into_iter()
        .map(|(asset_class, (market_value, holding_count))| {
            let percent_of_total = if total_market_value > Decimal::ZERO {
                (market_value / total_market_value * dec!(100)).round_dp(DECIMAL_PRECISION)
            } else {
                Decimal::ZERO
            };
            AssetClassBreakdown {
                asset_class,
                market_value: market_value.round_dp(DECIMAL_PRECISION),
                holding_count,
                percent_of_total,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.market_value
            .cmp(&a.market_value)
            .then_with(|| a.asset_class.as_str().cmp(b.asset_class.as_str()))
    });
    breakdown
}
