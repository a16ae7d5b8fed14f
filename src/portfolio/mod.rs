//! Portfolio analytics: holdings aggregation, AUM reconciliation,
//! time-weighted returns, and quality-control validation.

pub mod aum;
pub mod holdings;
pub mod performance;
pub mod qc;

pub use aum::*;
pub use holdings::*;
pub use performance::*;
pub use qc::*;
