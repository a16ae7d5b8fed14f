//! AUM reconciliation over a closed period.
//!
//! The accounting identity `eop = bop + net external flows + market gain`
//! is the central contract of the engine. `market_pnl` is the balancing
//! term by construction; the identity difference is nonetheless computed
//! through an independent summation path so that any rounding drift in the
//! flow aggregation becomes observable instead of cancelling out.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::policy::CalculationPolicy;
use crate::positions::{snapshot_as_of, snapshot_market_value};
use crate::transactions::{
    cash_direction, is_external_flow, normalized_amount, signed_external_amount,
    validate_transactions, CashDirection, Transaction,
};

use super::aum_model::{AumInput, AumReport};

/// Reconciles assets under management for one account over
/// `[start_date, end_date]`.
///
/// Beginning and ending values come from the position snapshots at or
/// nearest before each boundary date. Posted external flows strictly after
/// `start_date` and up to `end_date` are partitioned into contributions and
/// withdrawals by type. An account with no data in range reconciles to an
/// all-zero report that vacuously passes the identity check.
pub fn compute_aum(
    account_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    input: &AumInput,
    policy: &CalculationPolicy,
) -> Result<AumReport> {
    if start_date > end_date {
        return Err(ValidationError::InvalidDateRange {
            start: start_date,
            end: end_date,
        }
        .into());
    }
    validate_transactions(input.transactions)?;

    let beginning_value = snapshot_market_value(&snapshot_as_of(input.positions, start_date));
    let ending_value = snapshot_market_value(&snapshot_as_of(input.positions, end_date));

    let in_period = |t: &&Transaction| {
        t.is_posted() && t.date > start_date && t.date <= end_date && is_external_flow(t)
    };

    let mut contributions = Decimal::ZERO;
    let mut withdrawals = Decimal::ZERO;
    for transaction in input.transactions.iter().filter(in_period) {
        match cash_direction(transaction.transaction_type) {
            CashDirection::Inflow => contributions += normalized_amount(transaction),
            CashDirection::Outflow => withdrawals += normalized_amount(transaction),
        }
    }

    let net_flows = contributions - withdrawals;
    let market_pnl = ending_value - beginning_value - net_flows;

    // Independent path: signed re-sum in transaction order, not the
    // partition totals
    let resummed_flows: Decimal = input
        .transactions
        .iter()
        .filter(|t| t.is_posted() && t.date > start_date && t.date <= end_date)
        .map(signed_external_amount)
        .sum();

    let identity_difference = ending_value - (beginning_value + resummed_flows + market_pnl);
    let identity_check = identity_difference.abs() <= policy.identity_tolerance;

    Ok(AumReport {
        account_id: account_id.to_string(),
        start_date,
        end_date,
        beginning_value: beginning_value.round_dp(DECIMAL_PRECISION),
        ending_value: ending_value.round_dp(DECIMAL_PRECISION),
        contributions: contributions.round_dp(DECIMAL_PRECISION),
        withdrawals: withdrawals.round_dp(DECIMAL_PRECISION),
        net_flows: net_flows.round_dp(DECIMAL_PRECISION),
        market_pnl: market_pnl.round_dp(DECIMAL_PRECISION),
        identity_difference: identity_difference.round_dp(DECIMAL_PRECISION),
        identity_check,
    })
}
