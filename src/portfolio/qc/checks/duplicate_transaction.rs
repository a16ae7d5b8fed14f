//! Duplicate transaction check.
//!
//! The same account/date/type/amount appearing more than once is usually a
//! double-keyed entry rather than a genuine repeat, so it surfaces as a
//! warning with the colliding keys in evidence.

use serde_json::json;
use std::collections::HashMap;

use crate::portfolio::qc::qc_model::{QcInput, QcResult};
use crate::transactions::normalized_amount;

pub const CHECK_NAME: &str = "DUPLICATE_TRANSACTION";

/// Check for repeated (account, date, type, amount) transaction keys.
pub struct DuplicateTransactionCheck;

impl DuplicateTransactionCheck {
    pub fn run(input: &QcInput) -> QcResult {
        let mut by_key: HashMap<String, Vec<&str>> = HashMap::new();

        for transaction in input.transactions.iter().filter(|t| t.is_posted()) {
            // Amount is normalized so sign-flipped copies still collide
            let key = format!(
                "{}|{}|{}|{}",
                transaction.account_id,
                transaction.date,
                transaction.transaction_type,
                normalized_amount(transaction),
            );
            by_key.entry(key).or_default().push(transaction.id.as_str());
        }

        let mut duplicates: Vec<_> = by_key
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(key, ids)| {
                let count = ids.len();
                json!({ "key": key, "transactionIds": ids, "count": count })
            })
            .collect();
        duplicates.sort_by_key(|d| d["key"].as_str().map(String::from));

        if duplicates.is_empty() {
            QcResult::pass(CHECK_NAME, "No duplicate transactions detected")
        } else {
            QcResult::warn(
                CHECK_NAME,
                format!("{} duplicate transaction group(s) detected", duplicates.len()),
                json!({ "duplicates": duplicates }),
            )
        }
    }
}
