//! Portfolio Engine - pure calculation library for investment reporting.
//!
//! Operates on already-fetched, in-memory records (positions, transactions,
//! prices, securities) for a single account and date range. Four components
//! are consumed in order by request handlers:
//!
//! - holdings aggregation (market value, unrealized P&L, allocation weights)
//! - AUM reconciliation (beginning/ending value, external flows, the
//!   identity check)
//! - time-weighted return calculation (daily series, chain-linked totals,
//!   volatility, Sharpe)
//! - quality-control validation (cross-check battery over the above)
//!
//! The engine owns no persistent state, performs no I/O, and trusts its
//! caller for authorization and data scoping. All currency arithmetic uses
//! `rust_decimal` so the identity tolerance holds deterministically.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod policy;
pub mod positions;
pub mod quotes;
pub mod transactions;

pub mod portfolio;

// Re-export common types
pub use assets::*;
pub use policy::{CalculationPolicy, DayCount};
pub use portfolio::*;
pub use positions::*;
pub use quotes::*;
pub use transactions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
