use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseSideError;

/// Direction of a trade
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
    None,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
            TradeSide::None => "none",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            "none" => Ok(TradeSide::None),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Trading signal produced by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// An executed trade, or the "none" outcome of a decision.
///
/// Price and timestamp are present exactly when the side is buy or sell.
/// The constructors are the only way to build one, so that holds for every value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Trade {
    ticker: String,
    side: TradeSide,
    price: Option<Decimal>,
    timestamp: Option<DateTime<Utc>>,
}

impl Trade {
    /// No trade was made for `ticker`
    pub fn none(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            side: TradeSide::None,
            price: None,
            timestamp: None,
        }
    }

    pub fn buy(ticker: impl Into<String>, price: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self::executed(ticker, TradeSide::Buy, price, timestamp)
    }

    pub fn sell(ticker: impl Into<String>, price: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self::executed(ticker, TradeSide::Sell, price, timestamp)
    }

    fn executed(
        ticker: impl Into<String>,
        side: TradeSide,
        price: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            side,
            price: Some(price),
            timestamp: Some(timestamp),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn side(&self) -> TradeSide {
        self.side
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn is_none(&self) -> bool {
        self.side == TradeSide::None
    }
}
