//! Comprehensive QC runner.

use crate::policy::CalculationPolicy;

use super::checks::{
    AumIdentityCheck, DuplicateTransactionCheck, NegativeCashCheck, PositionCompletenessCheck,
};
use super::qc_model::{QcInput, QcReport};

/// Runs the full check battery over one account's reconciliation and raw
/// records.
///
/// Every check always runs; aggregation is Fail if any check fails, Warn if
/// none fail but at least one warns, else Pass.
pub fn run_comprehensive_qc(input: &QcInput, policy: &CalculationPolicy) -> QcReport {
    let checks = vec![
        AumIdentityCheck::run(input, policy),
        PositionCompletenessCheck::run(input),
        NegativeCashCheck::run(input),
        DuplicateTransactionCheck::run(input),
    ];

    QcReport::from_results(input.account_id, checks)
}
