//! AUM identity check.
//!
//! Re-derives beginning/ending value, flows and market gain from the raw
//! records and compares each against the reconciliation under audit. The
//! re-derivation goes through the reconciler itself on the original inputs,
//! which makes drift between the supplied report and its sources visible
//! (stale report, mutated records, mismatched period).

use serde_json::json;

use crate::policy::CalculationPolicy;
use crate::portfolio::aum::{compute_aum, AumInput};
use crate::portfolio::qc::qc_model::{QcInput, QcResult};
use rust_decimal::Decimal;

pub const CHECK_NAME: &str = "AUM_IDENTITY";

/// Check that the supplied AUM reconciliation balances and matches an
/// independent re-derivation within tolerance.
pub struct AumIdentityCheck;

impl AumIdentityCheck {
    pub fn run(input: &QcInput, policy: &CalculationPolicy) -> QcResult {
        let aum = input.aum;

        let rederived = match compute_aum(
            input.account_id,
            aum.start_date,
            aum.end_date,
            &AumInput {
                positions: input.positions,
                transactions: input.transactions,
            },
            policy,
        ) {
            Ok(report) => report,
            Err(e) => {
                return QcResult::fail(
                    CHECK_NAME,
                    format!("Re-derivation failed: {}", e),
                    json!({ "error": e.to_string() }),
                );
            }
        };

        let tolerance = policy.identity_tolerance;
        let mut mismatches = Vec::new();
        let mut compare = |field: &str, supplied: Decimal, derived: Decimal| {
            if (supplied - derived).abs() > tolerance {
                mismatches.push(json!({
                    "field": field,
                    "supplied": supplied,
                    "derived": derived,
                }));
            }
        };

        compare("beginningValue", aum.beginning_value, rederived.beginning_value);
        compare("endingValue", aum.ending_value, rederived.ending_value);
        compare("contributions", aum.contributions, rederived.contributions);
        compare("withdrawals", aum.withdrawals, rederived.withdrawals);
        compare("netFlows", aum.net_flows, rederived.net_flows);
        compare("marketPnl", aum.market_pnl, rederived.market_pnl);

        let identity_broken = aum.identity_difference.abs() > tolerance;

        if mismatches.is_empty() && !identity_broken {
            QcResult::pass(
                CHECK_NAME,
                format!(
                    "Identity balances: {} = {} + {} + {}",
                    aum.ending_value, aum.beginning_value, aum.net_flows, aum.market_pnl
                ),
            )
        } else {
            let message = if identity_broken {
                format!(
                    "Identity difference {} exceeds tolerance {}",
                    aum.identity_difference, tolerance
                )
            } else {
                format!("{} field(s) diverge from re-derivation", mismatches.len())
            };
            QcResult::fail(
                CHECK_NAME,
                message,
                json!({
                    "identityDifference": aum.identity_difference,
                    "tolerance": tolerance,
                    "mismatches": mismatches,
                }),
            )
        }
    }
}
