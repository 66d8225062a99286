// Decision and order execution module
pub mod executor;

pub use executor::DecisionEngine;
