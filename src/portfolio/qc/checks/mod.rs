//! Individual quality-control check implementations:
//! - AUM identity re-derivation
//! - Position completeness
//! - Negative cash detection
//! - Duplicate transaction detection

pub mod aum_identity;
pub mod duplicate_transaction;
pub mod negative_cash;
pub mod position_completeness;

pub use aum_identity::AumIdentityCheck;
pub use duplicate_transaction::DuplicateTransactionCheck;
pub use negative_cash::NegativeCashCheck;
pub use position_completeness::PositionCompletenessCheck;
