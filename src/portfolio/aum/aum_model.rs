use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::positions::Position;
use crate::transactions::Transaction;

/// Input bundle for the AUM reconciler. Records must be pre-filtered to the
/// target account by the data-access layer.
#[derive(Debug, Clone, Copy)]
pub struct AumInput<'a> {
    pub positions: &'a [Position],
    pub transactions: &'a [Transaction],
}

/// Period-level AUM reconciliation: beginning/ending value, external flows,
/// the balancing market gain/loss, and the identity check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AumReport {
    pub account_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub beginning_value: Decimal,
    pub ending_value: Decimal,
    /// External inflows (deposits/transfers in), absolute
    pub contributions: Decimal,
    /// External outflows (withdrawals/transfers out), absolute
    pub withdrawals: Decimal,
    pub net_flows: Decimal,
    /// Derived balancing term: eop - bop - net flows
    pub market_pnl: Decimal,
    /// eop - (bop + flows + market pnl), with flows re-summed along an
    /// independent path so rounding drift is observable
    pub identity_difference: Decimal,
    pub identity_check: bool,
}
