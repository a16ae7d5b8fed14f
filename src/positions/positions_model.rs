use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time holding snapshot for one security (or the cash slot) in an
/// account. `quantity` and `average_cost` are absent for pure cash rows,
/// which are represented by `market_value` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub account_id: String,
    pub date: NaiveDate,
    /// None for cash positions
    pub security_id: Option<String>,
    pub quantity: Option<Decimal>,
    pub average_cost: Option<Decimal>,
    pub market_value: Decimal,
}

impl Position {
    /// True when this row represents cash rather than a security holding.
    pub fn is_cash(&self) -> bool {
        self.security_id.is_none()
    }
}

/// Selects the most recent snapshot row per security (and for the cash slot)
/// dated on or before `as_of_date`.
///
/// Positions are expected to be pre-filtered to one account; rows after
/// `as_of_date` are ignored.
pub fn snapshot_as_of(positions: &[Position], as_of_date: NaiveDate) -> Vec<&Position> {
    let mut latest: HashMap<Option<&str>, &Position> = HashMap::new();

    for position in positions.iter().filter(|p| p.date <= as_of_date) {
        let key = position.security_id.as_deref();
        match latest.get(&key) {
            Some(existing) if existing.date >= position.date => {}
            _ => {
                latest.insert(key, position);
            }
        }
    }

    let mut snapshot: Vec<&Position> = latest.into_values().collect();
    // Deterministic ordering: cash slot first, then by security id
    snapshot.sort_by(|a, b| a.security_id.cmp(&b.security_id));
    snapshot
}

/// Aggregate market value of a snapshot.
pub fn snapshot_market_value(snapshot: &[&Position]) -> Decimal {
    snapshot.iter().map(|p| p.market_value).sum()
}

/// Distinct snapshot dates within `[start_date, end_date]`, ascending.
pub fn snapshot_dates_in_range(
    positions: &[Position],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = positions
        .iter()
        .map(|p| p.date)
        .filter(|d| *d >= start_date && *d <= end_date)
        .collect();
    dates.sort();
    dates.dedup();
    dates
}
