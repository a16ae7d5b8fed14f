mod flow_classifier;
pub mod transactions_model;

pub use flow_classifier::{
    cash_direction, classify_flow, is_external_flow, normalized_amount, signed_amount,
    signed_external_amount, CashDirection, FlowType,
};
pub use transactions_model::*;
