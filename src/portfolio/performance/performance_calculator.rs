//! Time-weighted return calculation.
//!
//! Daily sub-period returns subtract external flows from the numerator so
//! that contributions and withdrawals do not distort the measured
//! performance, then chain-link geometrically into a cumulative return.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{CalculatorError, Result, ValidationError};
use crate::policy::CalculationPolicy;
use crate::positions::{snapshot_as_of, snapshot_dates_in_range, snapshot_market_value};
use crate::transactions::{signed_external_amount, validate_transactions};

use super::performance_model::{DailyReturn, PerformanceInput, TwrSummary};

/// Computes the daily return series for one account over
/// `[start_date, end_date]`.
///
/// One entry is produced per day carrying a position snapshot in range. A
/// zero beginning value yields a zero return for that day by policy: a
/// zero-basis return is undefined and must never propagate NaN into the
/// cumulative chain.
pub fn compute_daily_returns(
    account_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    input: &PerformanceInput,
) -> Result<Vec<DailyReturn>> {
    if start_date > end_date {
        return Err(ValidationError::InvalidDateRange {
            start: start_date,
            end: end_date,
        }
        .into());
    }
    validate_transactions(input.transactions)?;

    let dates = snapshot_dates_in_range(input.positions, start_date, end_date);
    if dates.is_empty() {
        debug!(
            "No position snapshots for account {} between {} and {}.",
            account_id, start_date, end_date
        );
        return Ok(Vec::new());
    }

    let mut flows_by_date: HashMap<NaiveDate, Decimal> = HashMap::new();
    for transaction in input
        .transactions
        .iter()
        .filter(|t| t.is_posted() && t.date >= start_date && t.date <= end_date)
    {
        *flows_by_date.entry(transaction.date).or_default() +=
            signed_external_amount(transaction);
    }

    // Value the portfolio the day before the first snapshot so the first
    // sub-period measures that day's change, not zero
    let mut beginning_value = dates[0]
        .pred_opt()
        .map(|d| snapshot_market_value(&snapshot_as_of(input.positions, d)))
        .unwrap_or(Decimal::ZERO);

    let mut series = Vec::with_capacity(dates.len());
    let mut cumulative = Decimal::ONE;

    for date in dates {
        let ending_value = snapshot_market_value(&snapshot_as_of(input.positions, date));
        if ending_value.is_sign_negative() {
            return Err(CalculatorError::NegativeValue {
                account_id: account_id.to_string(),
                date,
                value: ending_value.to_string(),
            }
            .into());
        }

        let net_flows = flows_by_date.get(&date).copied().unwrap_or(Decimal::ZERO);

        let daily_return = if beginning_value > Decimal::ZERO {
            (ending_value - net_flows - beginning_value) / beginning_value
        } else {
            Decimal::ZERO
        };

        cumulative *= Decimal::ONE + daily_return;

        series.push(DailyReturn {
            date,
            beginning_value: beginning_value.round_dp(DECIMAL_PRECISION),
            ending_value: ending_value.round_dp(DECIMAL_PRECISION),
            net_flows: net_flows.round_dp(DECIMAL_PRECISION),
            daily_return: daily_return.round_dp(DECIMAL_PRECISION),
            cumulative_return: (cumulative - Decimal::ONE).round_dp(DECIMAL_PRECISION),
        });

        beginning_value = ending_value;
    }

    Ok(series)
}

/// Derives period summary statistics from a daily return series.
///
/// Fewer than two sub-periods is insufficient data and yields an all-zero
/// summary rather than an error.
pub fn compute_twr(daily_returns: &[DailyReturn], policy: &CalculationPolicy) -> TwrSummary {
    let periods = daily_returns.len();
    if periods < 2 {
        return TwrSummary::insufficient_data(periods);
    }

    let returns: Vec<Decimal> = daily_returns.iter().map(|r| r.daily_return).collect();

    // The series already carries the chain-linked total; re-folding the
    // per-day rounded returns would drift from it
    let total_return = daily_returns
        .last()
        .map(|r| r.cumulative_return)
        .unwrap_or(Decimal::ZERO);

    let annualized_twr = annualize_return(total_return, periods, policy);
    let volatility = annualized_volatility(&returns, policy);

    let sharpe_ratio = if volatility > Decimal::ZERO {
        (annualized_twr - policy.risk_free_rate) / volatility
    } else {
        Decimal::ZERO
    };

    TwrSummary {
        total_return_percent: (total_return * dec!(100)).round_dp(DECIMAL_PRECISION),
        annualized_twr: annualized_twr.round_dp(DECIMAL_PRECISION),
        volatility: volatility.round_dp(DECIMAL_PRECISION),
        sharpe_ratio: sharpe_ratio.round_dp(DECIMAL_PRECISION),
        max_drawdown: max_drawdown(&returns).round_dp(DECIMAL_PRECISION),
        periods,
    }
}

/// Geometric annualization: (1 + total)^(periods_per_year / periods) - 1.
///
/// Capped at -100%: a base at or below zero has no real fractional power.
/// Extrapolating a short series of large gains can overflow `Decimal`; such
/// a return is reported un-annualized rather than aborting.
fn annualize_return(total_return: Decimal, periods: usize, policy: &CalculationPolicy) -> Decimal {
    if total_return <= dec!(-1.0) {
        return dec!(-1.0);
    }

    let base = Decimal::ONE + total_return;
    if base <= Decimal::ZERO {
        return dec!(-1.0);
    }

    let exponent =
        Decimal::from(policy.day_count.periods_per_year()) / Decimal::from(periods as u64);

    match base.checked_powd(exponent) {
        Some(grown) => grown - Decimal::ONE,
        None => {
            debug!(
                "Annualization overflow for total return {} over {} periods; \
                 reporting un-annualized.",
                total_return, periods
            );
            total_return
        }
    }
}

/// Sample standard deviation of daily returns, annualized by
/// sqrt(periods_per_year).
fn annualized_volatility(returns: &[Decimal], policy: &CalculationPolicy) -> Decimal {
    if returns.len() < 2 {
        return Decimal::ZERO;
    }

    let count = Decimal::from(returns.len() as u64);
    let mean = returns.iter().sum::<Decimal>() / count;

    let sum_squared_diff: Decimal = returns
        .iter()
        .map(|&r| {
            let diff = r - mean;
            diff * diff
        })
        .sum();

    let variance = sum_squared_diff / (count - Decimal::ONE);
    if variance.is_sign_negative() {
        return Decimal::ZERO;
    }

    let daily_volatility = variance.sqrt().unwrap_or(Decimal::ZERO);

    let annualization_factor = Decimal::from(policy.day_count.periods_per_year())
        .sqrt()
        .unwrap_or_else(|| policy.day_count.sqrt_periods_approx());

    daily_volatility * annualization_factor
}

/// Largest peak-to-trough decline of the chain-linked growth series.
fn max_drawdown(returns: &[Decimal]) -> Decimal {
    let mut cumulative_value = Decimal::ONE;
    let mut peak_value = Decimal::ONE;
    let mut max_drawdown = Decimal::ZERO;

    for &daily_return in returns {
        cumulative_value *= Decimal::ONE + daily_return;
        peak_value = peak_value.max(cumulative_value);
        if peak_value.is_zero() {
            max_drawdown = max_drawdown.max(Decimal::ONE);
        } else {
            let drawdown = (peak_value - cumulative_value) / peak_value;
            max_drawdown = max_drawdown.max(drawdown);
        }
    }

    max_drawdown.max(Decimal::ZERO)
}
