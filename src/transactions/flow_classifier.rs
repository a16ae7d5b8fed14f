//! Flow classification for AUM reconciliation and TWR calculation.
//!
//! Cash-flow direction and the external/internal split are fixed lookups on
//! the transaction type. Upstream data entry has been observed storing
//! inconsistent amount signs, so the stored sign is never trusted: amounts
//! are taken as absolute values and re-signed from the type.

use rust_decimal::Decimal;

use crate::transactions::{Transaction, TransactionType};

/// Direction of a transaction's cash impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashDirection {
    /// Cash enters the account (SELL, DIVIDEND, INTEREST, DEPOSIT, TRANSFER_IN)
    Inflow,
    /// Cash leaves the account (BUY, FEE, TAX, WITHDRAWAL, TRANSFER_OUT)
    Outflow,
}

/// Flow type for performance and AUM calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// External flow - money crossing the account boundary.
    /// Counts as contribution/withdrawal and is neutralized in TWR.
    External,

    /// Internal flow - value moving within the account.
    /// Nets into market gain/loss, does not affect TWR flows.
    Internal,
}

/// Cash direction for a transaction type.
pub fn cash_direction(transaction_type: TransactionType) -> CashDirection {
    match transaction_type {
        TransactionType::Sell
        | TransactionType::Dividend
        | TransactionType::Interest
        | TransactionType::Deposit
        | TransactionType::TransferIn => CashDirection::Inflow,
        TransactionType::Buy
        | TransactionType::Fee
        | TransactionType::Tax
        | TransactionType::Withdrawal
        | TransactionType::TransferOut => CashDirection::Outflow,
    }
}

/// Classify a transaction type as external or internal at account scope.
///
/// External flows:
/// - DEPOSIT, WITHDRAWAL (money entering/leaving the account)
/// - TRANSFER_IN, TRANSFER_OUT (money moving to/from sibling accounts)
///
/// Internal flows:
/// - BUY, SELL (cash/security swap, no net account impact)
/// - DIVIDEND, INTEREST (income earned by the portfolio)
/// - FEE, TAX (deductions from existing money)
pub fn classify_flow(transaction_type: TransactionType) -> FlowType {
    match transaction_type {
        TransactionType::Deposit
        | TransactionType::Withdrawal
        | TransactionType::TransferIn
        | TransactionType::TransferOut => FlowType::External,
        TransactionType::Buy
        | TransactionType::Sell
        | TransactionType::Dividend
        | TransactionType::Interest
        | TransactionType::Fee
        | TransactionType::Tax => FlowType::Internal,
    }
}

/// Check if a transaction is an external flow.
pub fn is_external_flow(transaction: &Transaction) -> bool {
    classify_flow(transaction.transaction_type) == FlowType::External
}

/// Magnitude of a transaction's cash impact, independent of stored sign.
pub fn normalized_amount(transaction: &Transaction) -> Decimal {
    transaction.amount.abs()
}

/// Cash impact with the sign dictated by the transaction type.
pub fn signed_amount(transaction: &Transaction) -> Decimal {
    match cash_direction(transaction.transaction_type) {
        CashDirection::Inflow => normalized_amount(transaction),
        CashDirection::Outflow => -normalized_amount(transaction),
    }
}

/// Signed cash impact for external flows, zero for internal ones.
pub fn signed_external_amount(transaction: &Transaction) -> Decimal {
    if is_external_flow(transaction) {
        signed_amount(transaction)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::EntryStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn create_test_transaction(transaction_type: TransactionType, amount: Decimal) -> Transaction {
        Transaction {
            id: "test-1".to_string(),
            account_id: "account-1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            transaction_type,
            security_id: None,
            quantity: None,
            price: None,
            amount,
            entry_status: EntryStatus::Posted,
        }
    }

    // External flow tests
    #[test]
    fn test_deposit_is_external() {
        assert_eq!(classify_flow(TransactionType::Deposit), FlowType::External);
    }

    #[test]
    fn test_withdrawal_is_external() {
        assert_eq!(
            classify_flow(TransactionType::Withdrawal),
            FlowType::External
        );
    }

    #[test]
    fn test_transfers_are_external() {
        assert_eq!(
            classify_flow(TransactionType::TransferIn),
            FlowType::External
        );
        assert_eq!(
            classify_flow(TransactionType::TransferOut),
            FlowType::External
        );
    }

    // Internal flow tests
    #[test]
    fn test_buy_is_internal() {
        assert_eq!(classify_flow(TransactionType::Buy), FlowType::Internal);
    }

    #[test]
    fn test_sell_is_internal() {
        assert_eq!(classify_flow(TransactionType::Sell), FlowType::Internal);
    }

    #[test]
    fn test_income_is_internal() {
        assert_eq!(classify_flow(TransactionType::Dividend), FlowType::Internal);
        assert_eq!(classify_flow(TransactionType::Interest), FlowType::Internal);
    }

    #[test]
    fn test_fee_and_tax_are_internal() {
        assert_eq!(classify_flow(TransactionType::Fee), FlowType::Internal);
        assert_eq!(classify_flow(TransactionType::Tax), FlowType::Internal);
    }

    // Sign normalization tests
    #[test]
    fn test_withdrawal_sign_is_normalized() {
        // Stored positive and stored negative both normalize to an outflow
        let positive = create_test_transaction(TransactionType::Withdrawal, dec!(500));
        let negative = create_test_transaction(TransactionType::Withdrawal, dec!(-500));

        assert_eq!(signed_amount(&positive), dec!(-500));
        assert_eq!(signed_amount(&negative), dec!(-500));
    }

    #[test]
    fn test_deposit_sign_is_normalized() {
        let negative = create_test_transaction(TransactionType::Deposit, dec!(-1000));
        assert_eq!(signed_amount(&negative), dec!(1000));
    }

    #[test]
    fn test_buy_has_zero_external_amount() {
        let buy = create_test_transaction(TransactionType::Buy, dec!(-15000));
        assert_eq!(signed_external_amount(&buy), Decimal::ZERO);
        assert_eq!(signed_amount(&buy), dec!(-15000));
    }

    #[test]
    fn test_is_external_flow() {
        let deposit = create_test_transaction(TransactionType::Deposit, dec!(100));
        let dividend = create_test_transaction(TransactionType::Dividend, dec!(100));

        assert!(is_external_flow(&deposit));
        assert!(!is_external_flow(&dividend));
    }
}
