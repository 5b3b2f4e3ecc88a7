//! Scoring configuration.
//!
//! The thresholds and interval weights were fixed constants in the original
//! dashboards with no documented derivation, so they are configuration here
//! with those constants as defaults. Parseable from TOML.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::Interval;

/// Tunable scoring parameters. `Default` reproduces the classic rule set:
/// RSI 30/70 bands, per-interval verdict at score ±2, interval weights
/// 1m 0.5 / 5m 1.0 / 15m 1.5, weighted verdict at total ±2.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// RSI below this scores +1 (oversold).
    pub rsi_oversold: f64,
    /// RSI above this scores -1 (overbought).
    pub rsi_overbought: f64,
    /// Per-interval score at or above this is a BUY.
    pub buy_score: i32,
    /// Per-interval score at or below this is a SELL.
    pub sell_score: i32,
    /// Weighted total at or above this (or at or below its negation)
    /// is a STRONG BUY (or STRONG SELL).
    pub strong_threshold: f64,
    /// Per-interval weights for cross-interval aggregation.
    pub interval_weights: HashMap<Interval, f64>,
    /// Weight for intervals absent from `interval_weights`.
    pub default_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut interval_weights = HashMap::new();
        interval_weights.insert(Interval::Min1, 0.5);
        interval_weights.insert(Interval::Min5, 1.0);
        interval_weights.insert(Interval::Min15, 1.5);
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            buy_score: 2,
            sell_score: -2,
            strong_threshold: 2.0,
            interval_weights,
            default_weight: 1.0,
        }
    }
}

impl ScoringConfig {
    /// Weight applied to an interval's verdict during aggregation.
    pub fn weight_for(&self, interval: Interval) -> f64 {
        self.interval_weights
            .get(&interval)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
