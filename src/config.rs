use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::strategy::ThresholdStrategy;

const ENV_PREFIX: &str = "STOCKBOT";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Fractional move that triggers a trade (0.15 = 15%)
    pub threshold_pct: Decimal,
    /// Shares per order
    pub quantity: Decimal,
    pub log_filter: String,
}

impl Settings {
    /// Load defaults, then the optional file, then `STOCKBOT_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading `STOCKBOT_*` overrides from `env`
    /// instead of the process environment when it is given.
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .set_default("threshold_pct", "0.15")?
            .set_default("quantity", "200")?
            .set_default("log_filter", "stockbot=info")?;

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()
            .context("failed to read settings")?
            .try_deserialize()
            .context("failed to parse settings")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.strategy().validate()
    }

    pub fn strategy(&self) -> ThresholdStrategy {
        ThresholdStrategy::new(self.threshold_pct, self.quantity)
    }
}
