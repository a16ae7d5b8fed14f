//! Position completeness check.
//!
//! Every posted transaction that references a security should be backed by
//! either a position in that security or a price within a nearby-date
//! window; an orphaned reference usually means a missed snapshot or a
//! security that was never priced.

use serde_json::json;
use std::collections::HashSet;

use crate::constants::NEARBY_PRICE_WINDOW_DAYS;
use crate::portfolio::qc::qc_model::{QcInput, QcResult};
use crate::quotes::has_price_near;

pub const CHECK_NAME: &str = "POSITION_COMPLETENESS";

/// Check that transacted securities appear in positions or prices.
pub struct PositionCompletenessCheck;

impl PositionCompletenessCheck {
    pub fn run(input: &QcInput) -> QcResult {
        let position_securities: HashSet<&str> = input
            .positions
            .iter()
            .filter_map(|p| p.security_id.as_deref())
            .collect();

        let mut orphans = Vec::new();
        let mut checked = 0usize;

        for transaction in input.transactions.iter().filter(|t| t.is_posted()) {
            let Some(security_id) = transaction.security_id.as_deref() else {
                continue;
            };
            checked += 1;

            let has_position = position_securities.contains(security_id);
            let has_nearby_price = has_price_near(
                input.prices,
                security_id,
                transaction.date,
                NEARBY_PRICE_WINDOW_DAYS,
            );

            if !has_position && !has_nearby_price {
                orphans.push(json!({
                    "transactionId": transaction.id,
                    "securityId": security_id,
                    "date": transaction.date,
                }));
            }
        }

        if orphans.is_empty() {
            QcResult::pass(
                CHECK_NAME,
                format!("All {} security transactions are backed by data", checked),
            )
        } else {
            QcResult::fail(
                CHECK_NAME,
                format!(
                    "{} transaction(s) reference securities with no position or nearby price",
                    orphans.len()
                ),
                json!({
                    "windowDays": NEARBY_PRICE_WINDOW_DAYS,
                    "orphans": orphans,
                }),
            )
        }
    }
}
