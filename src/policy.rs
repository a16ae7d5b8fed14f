//! Configurable calculation policy.
//!
//! The identity tolerance and the annualization day-count are policy, not
//! algorithm: callers that reconcile against an external reference can tune
//! them without touching the calculators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CALENDAR_DAYS_PER_YEAR, IDENTITY_TOLERANCE, SQRT_CALENDAR_DAYS_APPROX,
    SQRT_TRADING_DAYS_APPROX, TRADING_DAYS_PER_YEAR,
};

/// Day-count convention used for annualizing returns and volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DayCount {
    /// 252 trading days per year
    #[default]
    TradingDays252,
    /// 365 calendar days per year
    CalendarDays365,
}

impl DayCount {
    /// Number of return periods per year under this convention.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            DayCount::TradingDays252 => TRADING_DAYS_PER_YEAR,
            DayCount::CalendarDays365 => CALENDAR_DAYS_PER_YEAR,
        }
    }

    /// sqrt(periods_per_year) fallback for volatility annualization.
    pub(crate) fn sqrt_periods_approx(&self) -> Decimal {
        match self {
            DayCount::TradingDays252 => SQRT_TRADING_DAYS_APPROX,
            DayCount::CalendarDays365 => SQRT_CALENDAR_DAYS_APPROX,
        }
    }
}

/// Policy knobs shared by the AUM reconciler, TWR calculator and QC validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationPolicy {
    /// Absolute tolerance for the AUM identity check, in currency units
    pub identity_tolerance: Decimal,

    /// Annualization convention for returns and volatility
    pub day_count: DayCount,

    /// Annualized risk-free rate subtracted before the Sharpe ratio
    pub risk_free_rate: Decimal,
}

impl Default for CalculationPolicy {
    fn default() -> Self {
        Self {
            identity_tolerance: IDENTITY_TOLERANCE,
            day_count: DayCount::default(),
            risk_free_rate: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy() {
        let policy = CalculationPolicy::default();
        assert_eq!(policy.identity_tolerance, dec!(0.01));
        assert_eq!(policy.day_count, DayCount::TradingDays252);
        assert_eq!(policy.risk_free_rate, Decimal::ZERO);
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(DayCount::TradingDays252.periods_per_year(), 252);
        assert_eq!(DayCount::CalendarDays365.periods_per_year(), 365);
    }
}
