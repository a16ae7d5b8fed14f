use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One close price per security per day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub security_id: String,
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Resolves the latest close for `security_id` on or before `as_of_date`.
///
/// Returns the price record so callers can inspect how stale it is.
pub fn latest_close_on_or_before<'a>(
    prices: &'a [Price],
    security_id: &str,
    as_of_date: NaiveDate,
) -> Option<&'a Price> {
    prices
        .iter()
        .filter(|p| p.security_id == security_id && p.date <= as_of_date)
        .max_by_key(|p| p.date)
}

/// True when any price for `security_id` lies within `window_days` of `date`.
pub fn has_price_near(
    prices: &[Price],
    security_id: &str,
    date: NaiveDate,
    window_days: i64,
) -> bool {
    prices
        .iter()
        .any(|p| p.security_id == security_id && (p.date - date).num_days().abs() <= window_days)
}
