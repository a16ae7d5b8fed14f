//! Negative cash check.
//!
//! A negative cash balance is suspicious for ordinary accounts but
//! legitimate under margin, so this check warns rather than fails.

use rust_decimal::Decimal;
use serde_json::json;

use crate::portfolio::qc::qc_model::{QcInput, QcResult};

pub const CHECK_NAME: &str = "NO_NEGATIVE_CASH";

/// Check for cash positions with negative market value.
pub struct NegativeCashCheck;

impl NegativeCashCheck {
    pub fn run(input: &QcInput) -> QcResult {
        let negatives: Vec<_> = input
            .positions
            .iter()
            .filter(|p| p.is_cash() && p.market_value < Decimal::ZERO)
            .map(|p| {
                json!({
                    "date": p.date,
                    "marketValue": p.market_value,
                })
            })
            .collect();

        if negatives.is_empty() {
            QcResult::pass(CHECK_NAME, "No negative cash balances")
        } else {
            QcResult::warn(
                CHECK_NAME,
                format!(
                    "{} cash snapshot(s) are negative; expected only for margin accounts",
                    negatives.len()
                ),
                json!({ "negativeBalances": negatives }),
            )
        }
    }
}
