use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use super::StockService;
use crate::error::ServiceError;
use crate::models::{Trade, TradeSide};

/// In-memory paper trading broker
///
/// Quotes and last trades are seeded by the caller. Orders fill instantly at
/// the current quote and become the ticker's new last trade. Nothing is persisted.
#[derive(Default)]
pub struct PaperBroker {
    prices: RwLock<HashMap<String, Decimal>>,
    last_trades: RwLock<HashMap<String, Trade>>,
    fills: Mutex<Vec<Trade>>,
}

impl PaperBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current quote for a ticker
    pub fn set_price(&self, ticker: &str, price: Decimal) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ticker.to_string(), price);
    }

    /// Record `trade` as the last trade for its ticker
    pub fn record_trade(&self, trade: Trade) {
        self.last_trades
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(trade.ticker().to_string(), trade);
    }

    /// Every fill made so far, oldest first
    pub fn fills(&self) -> Vec<Trade> {
        self.fills
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn quote(&self, ticker: &str) -> Option<Decimal> {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ticker)
            .copied()
    }

    fn fill(&self, ticker: &str, side: TradeSide, quantity: Decimal) -> Result<Trade, ServiceError> {
        if quantity <= Decimal::ZERO {
            return Err(ServiceError::ExecutionRejected(format!(
                "{} {} rejected: quantity must be positive (got {})",
                side, ticker, quantity
            )));
        }

        let price = self.quote(ticker).ok_or_else(|| {
            ServiceError::ExecutionRejected(format!("{} {} rejected: no quote", side, ticker))
        })?;

        let now = Utc::now();
        let trade = match side {
            TradeSide::Buy => Trade::buy(ticker, price, now),
            _ => Trade::sell(ticker, price, now),
        };

        tracing::info!(
            ticker = %ticker,
            side = %side,
            quantity = %quantity,
            price = %price,
            "Paper fill"
        );

        self.record_trade(trade.clone());
        self.fills
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(trade.clone());

        Ok(trade)
    }
}

impl StockService for PaperBroker {
    fn get_last_trade(&self, ticker: &str) -> Result<Trade, ServiceError> {
        self.last_trades
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ticker)
            .cloned()
            .ok_or_else(|| ServiceError::DataUnavailable(format!("no trades recorded for {}", ticker)))
    }

    fn get_current_price(&self, ticker: &str) -> Result<Decimal, ServiceError> {
        self.quote(ticker)
            .ok_or_else(|| ServiceError::DataUnavailable(format!("no quote for {}", ticker)))
    }

    fn buy(&self, ticker: &str, quantity: Decimal) -> Result<Trade, ServiceError> {
        self.fill(ticker, TradeSide::Buy, quantity)
    }

    fn sell(&self, ticker: &str, quantity: Decimal) -> Result<Trade, ServiceError> {
        self.fill(ticker, TradeSide::Sell, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_lookups_fail_when_nothing_seeded() {
        let broker = PaperBroker::new();

        let err = broker.get_current_price("ABC").unwrap_err();
        assert_eq!(err, ServiceError::DataUnavailable("no quote for ABC".to_string()));

        let err = broker.get_last_trade("ABC").unwrap_err();
        assert!(matches!(err, ServiceError::DataUnavailable(_)));
    }

    #[test]
    fn test_fill_at_current_quote() {
        let broker = PaperBroker::new();
        broker.set_price("ABC", price("11.50"));

        let trade = broker.sell("ABC", Decimal::from(200)).unwrap();

        assert_eq!(trade.side(), TradeSide::Sell);
        assert_eq!(trade.price(), Some(price("11.50")));
        assert!(trade.timestamp().is_some());
    }

    #[test]
    fn test_fill_becomes_last_trade() {
        let broker = PaperBroker::new();
        broker.set_price("ABC", price("8.03"));
        broker.record_trade(Trade::sell("ABC", price("10.00"), Utc::now()));

        let trade = broker.buy("ABC", Decimal::from(200)).unwrap();

        assert_eq!(broker.get_last_trade("ABC").unwrap(), trade);
        assert_eq!(broker.fills(), vec![trade]);
    }

    #[test]
    fn test_reject_without_quote() {
        let broker = PaperBroker::new();

        let err = broker.buy("ABC", Decimal::from(200)).unwrap_err();
        assert!(matches!(err, ServiceError::ExecutionRejected(_)));
        assert!(broker.fills().is_empty());
    }

    #[test]
    fn test_reject_non_positive_quantity() {
        let broker = PaperBroker::new();
        broker.set_price("ABC", price("10.00"));

        let err = broker.sell("ABC", Decimal::ZERO).unwrap_err();
        assert!(err.to_string().contains("quantity must be positive"));
        assert!(broker.fills().is_empty());
    }
}
