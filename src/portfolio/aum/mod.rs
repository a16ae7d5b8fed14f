pub mod aum_calculator;
pub mod aum_model;

pub use aum_calculator::*;
pub use aum_model::*;
