// Trading strategy module
pub mod threshold;

pub use threshold::ThresholdStrategy;
