// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod models;
pub mod strategy;

// Re-export commonly used types
pub use api::{PaperBroker, StockService};
pub use error::ServiceError;
pub use execution::DecisionEngine;
pub use logging::{LogService, TracingLogService};
pub use models::{Signal, Trade, TradeSide};
pub use strategy::ThresholdStrategy;
