//! Quality-control validation.
//!
//! A fixed battery of cross-checks over the outputs of the other
//! calculators and the raw records they consumed. Checks are independent:
//! a failure never short-circuits the rest of the battery.

pub mod checks;
pub mod qc_model;
pub mod qc_service;

pub use qc_model::*;
pub use qc_service::*;
