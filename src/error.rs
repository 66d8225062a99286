use thiserror::Error;

/// Failures raised by a [`StockService`](crate::api::StockService) or by the
/// decision engine's own input check.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("execution rejected: {0}")]
    ExecutionRejected(String),

    #[error("invalid ticker: '{0}'")]
    InvalidTicker(String),

    #[error("calculation failed: {0}")]
    Calculation(String),
}

impl ServiceError {
    /// The failure text without the kind prefix
    pub fn message(&self) -> String {
        match self {
            ServiceError::DataUnavailable(msg)
            | ServiceError::ExecutionRejected(msg)
            | ServiceError::Calculation(msg) => msg.clone(),
            ServiceError::InvalidTicker(_) => self.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown trade side '{0}' (expected buy, sell or none)")]
pub struct ParseSideError(pub String);
