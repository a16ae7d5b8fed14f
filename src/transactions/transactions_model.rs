use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Transaction lifecycle state. Only Posted transactions are final and
/// eligible for calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Draft,
    #[default]
    Posted,
}

/// Enumerated transaction types. Cash-flow direction and the
/// external/internal split are derived from the type, never from the stored
/// amount sign (see `flow_classifier`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
    Interest,
    Deposit,
    TransferIn,
    Withdrawal,
    TransferOut,
    Fee,
    Tax,
}

impl TransactionType {
    /// Returns the string representation of this transaction type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Dividend => "DIVIDEND",
            TransactionType::Interest => "INTEREST",
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::TransferIn => "TRANSFER_IN",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::TransferOut => "TRANSFER_OUT",
            TransactionType::Fee => "FEE",
            TransactionType::Tax => "TAX",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable transaction record as supplied by the data-access layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    /// None for pure cash movements
    pub security_id: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    /// Stored amount; sign is normalized by type before use
    pub amount: Decimal,
    pub entry_status: EntryStatus,
}

impl Transaction {
    /// True when this transaction participates in calculations.
    pub fn is_posted(&self) -> bool {
        self.entry_status == EntryStatus::Posted
    }

    /// Fails fast on malformed records: trade transactions must name a
    /// security and a quantity.
    pub fn validate(&self) -> Result<()> {
        match self.transaction_type {
            TransactionType::Buy | TransactionType::Sell => {
                if self.security_id.is_none() {
                    return Err(ValidationError::MissingField {
                        record: format!("transaction {}", self.id),
                        field: "securityId".to_string(),
                    }
                    .into());
                }
                if self.quantity.is_none() {
                    return Err(ValidationError::MissingField {
                        record: format!("transaction {}", self.id),
                        field: "quantity".to_string(),
                    }
                    .into());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Validates a batch of transactions, surfacing the first malformed record.
pub fn validate_transactions(transactions: &[Transaction]) -> Result<()> {
    for transaction in transactions {
        transaction.validate()?;
    }
    Ok(())
}
