pub mod quotes_model;

pub use quotes_model::*;
