pub mod paper;

pub use paper::PaperBroker;

use rust_decimal::Decimal;

use crate::error::ServiceError;
use crate::models::Trade;

/// Market data and order execution for a single ticker at a time.
///
/// Every call is a synchronous, single attempt. Retry and timeout policy,
/// if any, belongs to the implementation.
pub trait StockService: Send + Sync {
    /// Most recent trade recorded for `ticker`
    fn get_last_trade(&self, ticker: &str) -> Result<Trade, ServiceError>;

    fn get_current_price(&self, ticker: &str) -> Result<Decimal, ServiceError>;

    /// Buy `quantity` shares and return the resulting fill
    fn buy(&self, ticker: &str, quantity: Decimal) -> Result<Trade, ServiceError>;

    /// Sell `quantity` shares and return the resulting fill
    fn sell(&self, ticker: &str, quantity: Decimal) -> Result<Trade, ServiceError>;
}

impl<T: StockService + ?Sized> StockService for &T {
    fn get_last_trade(&self, ticker: &str) -> Result<Trade, ServiceError> {
        (**self).get_last_trade(ticker)
    }

    fn get_current_price(&self, ticker: &str) -> Result<Decimal, ServiceError> {
        (**self).get_current_price(ticker)
    }

    fn buy(&self, ticker: &str, quantity: Decimal) -> Result<Trade, ServiceError> {
        (**self).buy(ticker, quantity)
    }

    fn sell(&self, ticker: &str, quantity: Decimal) -> Result<Trade, ServiceError> {
        (**self).sell(ticker, quantity)
    }
}
