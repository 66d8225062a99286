use crate::api::StockService;
use crate::error::ServiceError;
use crate::logging::LogService;
use crate::models::{Signal, Trade};
use crate::strategy::ThresholdStrategy;

/// Runs the threshold strategy for one ticker and executes its signal.
///
/// Stateless between calls: each `decide` reads the last trade and the current
/// price fresh from the service.
pub struct DecisionEngine<S, L> {
    stock_service: S,
    log_service: L,
    strategy: ThresholdStrategy,
}

impl<S: StockService, L: LogService> DecisionEngine<S, L> {
    pub fn new(stock_service: S, log_service: L) -> Self {
        Self::with_strategy(stock_service, log_service, ThresholdStrategy::default())
    }

    pub fn with_strategy(stock_service: S, log_service: L, strategy: ThresholdStrategy) -> Self {
        Self {
            stock_service,
            log_service,
            strategy,
        }
    }

    pub fn strategy(&self) -> &ThresholdStrategy {
        &self.strategy
    }

    /// Decide and, if the threshold is met, trade `ticker`.
    ///
    /// Never fails: any service error is sent to the log sink once and the
    /// result degrades to a "none" trade.
    pub fn decide(&self, ticker: &str) -> Trade {
        match self.try_decide(ticker) {
            Ok(trade) => trade,
            Err(e) => {
                tracing::warn!(ticker = %ticker, error = %e, "Decision failed, no trade");
                self.log_service.log(&e.message());
                Trade::none(ticker)
            }
        }
    }

    fn try_decide(&self, ticker: &str) -> Result<Trade, ServiceError> {
        if ticker.trim().is_empty() {
            return Err(ServiceError::InvalidTicker(ticker.to_string()));
        }

        let last_trade = self.stock_service.get_last_trade(ticker)?;
        let current_price = self.stock_service.get_current_price(ticker)?;

        let signal = self.strategy.generate_signal(&last_trade, current_price)?;
        tracing::debug!(
            ticker = %ticker,
            last_side = %last_trade.side(),
            last_price = ?last_trade.price(),
            current_price = %current_price,
            signal = ?signal,
            "Evaluated {}",
            self.strategy.name()
        );

        let quantity = self.strategy.quantity();
        let trade = match signal {
            Signal::Buy => self.stock_service.buy(ticker, quantity)?,
            Signal::Sell => self.stock_service.sell(ticker, quantity)?,
            Signal::Hold => return Ok(Trade::none(ticker)),
        };

        tracing::info!(
            ticker = %ticker,
            side = %trade.side(),
            quantity = %quantity,
            price = ?trade.price(),
            "Executed trade"
        );

        Ok(trade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaperBroker;
    use crate::models::TradeSide;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        messages: Mutex<Vec<String>>,
    }

    impl LogService for RecordingLog {
        fn log(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    impl RecordingLog {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn broker_with(last: Trade, current: &str) -> PaperBroker {
        let broker = PaperBroker::new();
        broker.set_price(last.ticker(), d(current));
        broker.record_trade(last);
        broker
    }

    #[test]
    fn test_sell_fill_comes_from_broker() {
        let broker = broker_with(
            Trade::buy("ABC", d("10.00"), Utc::now() - Duration::hours(4)),
            "11.50",
        );
        let log = RecordingLog::default();
        let engine = DecisionEngine::new(&broker, &log);

        let trade = engine.decide("ABC");

        assert_eq!(trade.side(), TradeSide::Sell);
        assert_eq!(trade.price(), Some(d("11.50")));
        assert_eq!(broker.fills(), vec![trade]);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn test_round_trip_through_broker() {
        let broker = broker_with(Trade::sell("ABC", d("10.00"), Utc::now()), "8.03");
        let log = RecordingLog::default();
        let engine = DecisionEngine::new(&broker, &log);

        assert_eq!(engine.decide("ABC").side(), TradeSide::Buy);

        // the buy at 8.03 is now the reference; +15% is 9.2345
        broker.set_price("ABC", d("9.23"));
        assert!(engine.decide("ABC").is_none());

        broker.set_price("ABC", d("9.2345"));
        assert_eq!(engine.decide("ABC").side(), TradeSide::Sell);

        assert_eq!(broker.fills().len(), 2);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn test_missing_quote_is_logged_once() {
        let broker = PaperBroker::new();
        broker.record_trade(Trade::buy("ABC", d("10.00"), Utc::now()));
        let log = RecordingLog::default();
        let engine = DecisionEngine::new(&broker, &log);

        let trade = engine.decide("ABC");

        assert_eq!(trade, Trade::none("ABC"));
        assert_eq!(log.messages(), vec!["no quote for ABC".to_string()]);
        assert!(broker.fills().is_empty());
    }

    #[test]
    fn test_empty_ticker_rejected_before_lookup() {
        let broker = PaperBroker::new();
        let log = RecordingLog::default();
        let engine = DecisionEngine::new(&broker, &log);

        let trade = engine.decide("  ");

        assert!(trade.is_none());
        assert_eq!(log.messages().len(), 1);
        assert!(log.messages()[0].contains("invalid ticker"));
    }

    #[test]
    fn test_custom_strategy_quantity() {
        let broker = broker_with(Trade::buy("ABC", d("100"), Utc::now()), "105");
        let log = RecordingLog::default();
        let engine = DecisionEngine::with_strategy(
            &broker,
            &log,
            ThresholdStrategy::new(d("0.05"), d("10")),
        );

        assert_eq!(engine.strategy().quantity(), d("10"));
        assert_eq!(engine.decide("ABC").side(), TradeSide::Sell);
    }
}
