use anyhow::{bail, Result};
use rust_decimal::Decimal;

use crate::error::ServiceError;
use crate::models::{Signal, Trade, TradeSide};

/// Percentage-move strategy relative to the last trade
///
/// - Last trade was a sell: buy once the price has dropped by at least `threshold_pct`
/// - Otherwise: sell once the price has risen by at least `threshold_pct`
///
/// Both comparisons are inclusive and measured against the last trade's price.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdStrategy {
    threshold_pct: Decimal,
    quantity: Decimal,
}

impl ThresholdStrategy {
    /// Inputs are taken as given; call [`validate`](Self::validate) before trading
    /// with values that did not come from `Settings`.
    pub fn new(threshold_pct: Decimal, quantity: Decimal) -> Self {
        Self {
            threshold_pct,
            quantity,
        }
    }

    pub fn threshold_pct(&self) -> Decimal {
        self.threshold_pct
    }

    /// Shares per order
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Threshold must lie in (0, 1) and quantity must be positive
    pub fn validate(&self) -> Result<()> {
        if self.threshold_pct <= Decimal::ZERO || self.threshold_pct >= Decimal::ONE {
            bail!(
                "invalid threshold_pct {}: must be between 0 and 1 (exclusive)",
                self.threshold_pct
            );
        }
        if self.quantity <= Decimal::ZERO {
            bail!("invalid quantity {}: must be > 0", self.quantity);
        }
        Ok(())
    }

    /// Fails only when the price band cannot be represented as a `Decimal`.
    pub fn generate_signal(
        &self,
        last_trade: &Trade,
        current_price: Decimal,
    ) -> Result<Signal, ServiceError> {
        // A "none" record has no reference price, so nothing can trigger.
        let Some(last_price) = last_trade.price() else {
            return Ok(Signal::Hold);
        };
        let overflow = || {
            ServiceError::Calculation(format!(
                "threshold for last price {} overflows",
                last_price
            ))
        };
        let band = last_price
            .checked_mul(self.threshold_pct)
            .ok_or_else(overflow)?;

        let signal = match last_trade.side() {
            TradeSide::Sell => {
                let floor = last_price.checked_sub(band).ok_or_else(overflow)?;
                if current_price <= floor {
                    Signal::Buy
                } else {
                    Signal::Hold
                }
            }
            // buy, and anything that isn't a sell
            TradeSide::Buy | TradeSide::None => {
                let ceiling = last_price.checked_add(band).ok_or_else(overflow)?;
                if current_price >= ceiling {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
        };
        Ok(signal)
    }

    pub fn name(&self) -> &str {
        "Threshold"
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self {
            threshold_pct: Decimal::new(15, 2), // 15%
            quantity: Decimal::from(200),
        }
    }
}
