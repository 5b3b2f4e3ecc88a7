//! Indicator trait, the per-series indicator battery, and concrete impls.
//!
//! Indicators are pure functions: bar history in, numeric series out,
//! aligned 1:1 with the input bars. The first `lookback()` values are
//! `f64::NAN` (warmup) and are excluded from scoring, never defaulted to
//! zero. `compute_indicators` runs the standard battery once per series;
//! scoring and readout then query the resulting `IndicatorSet` by name.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vwap;

pub use atr::{true_range, wilder_smooth, Atr};
pub use bollinger::{Bollinger, BollingerBand};
pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdOutput};
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochasticOutput};
pub use vwap::Vwap;

use crate::domain::{Bar, Series};
use std::collections::HashMap;

/// Default windows for the standard battery. These are the conventional
/// parameters; scoring thresholds live in `ScoringConfig` instead.
pub const RSI_WINDOW: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_WINDOW: usize = 20;
pub const BOLLINGER_MULT: f64 = 2.0;
pub const STOCHASTIC_WINDOW: usize = 14;
pub const STOCHASTIC_SMOOTH: usize = 3;
pub const ATR_WINDOW: usize = 14;

/// Series names used by the standard battery.
pub mod keys {
    pub const RSI: &str = "rsi_14";
    pub const MACD: &str = "macd_12_26";
    pub const MACD_SIGNAL: &str = "macd_signal_12_26_9";
    pub const VWAP: &str = "vwap";
    pub const BOLLINGER_UPPER: &str = "bollinger_upper_20_2";
    pub const BOLLINGER_MIDDLE: &str = "bollinger_middle_20_2";
    pub const BOLLINGER_LOWER: &str = "bollinger_lower_20_2";
    pub const STOCH_K: &str = "stoch_k_14";
    pub const STOCH_D: &str = "stoch_d_14_3";
    pub const SMA_50: &str = "sma_50";
    pub const SMA_200: &str = "sma_200";
    pub const EMA_20: &str = "ema_20";
    pub const EMA_50: &str = "ema_50";
    pub const EMA_200: &str = "ema_200";
    pub const ATR: &str = "atr_14";
    pub const OBV: &str = "obv";
}

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values should be `f64::NAN`.
///
/// No indicator value at bar t may depend on price data from bar t+1 or
/// later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "atr_14").
    fn name(&self) -> &str;

    /// Number of leading bars for which the output is undefined.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Per-bar derived values aligned 1:1 with a series, keyed by indicator name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Value at the last bar, filtered to defined (non-NaN) values.
    ///
    /// Returns `None` for an unknown name, an empty series, or a value
    /// still inside the warmup window — the scoring layer treats all three
    /// the same way (insufficient data).
    pub fn latest_defined(&self, name: &str) -> Option<f64> {
        let values = self.series.get(name)?;
        let last = *values.last()?;
        if last.is_nan() {
            None
        } else {
            Some(last)
        }
    }

    /// Full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Mean of the defined values of a named series, or `None` if no value
    /// is defined. Used by the readout's ATR/OBV vs-own-mean comparisons.
    pub fn series_mean(&self, name: &str) -> Option<f64> {
        let values = self.series.get(name)?;
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in values {
            if !v.is_nan() {
                sum += v;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Run the standard indicator battery over a series.
///
/// Never fails: a series shorter than an indicator's warmup simply yields
/// all-NaN output for that indicator, and scoring reports insufficient
/// data instead of raising.
pub fn compute_indicators(series: &Series) -> IndicatorSet {
    let bars = series.bars();
    let battery: Vec<Box<dyn Indicator>> = vec![
        Box::new(Rsi::new(RSI_WINDOW)),
        Box::new(Macd::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL, MacdOutput::Line)),
        Box::new(Macd::new(
            MACD_FAST,
            MACD_SLOW,
            MACD_SIGNAL,
            MacdOutput::Signal,
        )),
        Box::new(Vwap::new()),
        Box::new(Bollinger::upper(BOLLINGER_WINDOW, BOLLINGER_MULT)),
        Box::new(Bollinger::middle(BOLLINGER_WINDOW, BOLLINGER_MULT)),
        Box::new(Bollinger::lower(BOLLINGER_WINDOW, BOLLINGER_MULT)),
        Box::new(Stochastic::percent_k(STOCHASTIC_WINDOW, STOCHASTIC_SMOOTH)),
        Box::new(Stochastic::percent_d(STOCHASTIC_WINDOW, STOCHASTIC_SMOOTH)),
        Box::new(Sma::new(50)),
        Box::new(Sma::new(200)),
        Box::new(Ema::new(20)),
        Box::new(Ema::new(50)),
        Box::new(Ema::new(200)),
        Box::new(Atr::new(ATR_WINDOW)),
        Box::new(Obv::new()),
    ];

    let mut set = IndicatorSet::new();
    for indicator in &battery {
        set.insert(indicator.name().to_string(), indicator.compute(bars));
    }
    set
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = (open.min(close) - 1.0).max(0.01);
            Bar {
                timestamp: base + chrono::Duration::minutes(5 * i as i64),
                open,
                high,
                low,
                close,
                volume: 1_000.0,
            }
        })
        .collect()
}

/// Synthetic bars with explicit volumes, for VWAP/OBV tests.
#[cfg(test)]
pub fn make_bars_with_volume(closes_volumes: &[(f64, f64)]) -> Vec<Bar> {
    let closes: Vec<f64> = closes_volumes.iter().map(|&(c, _)| c).collect();
    let mut bars = make_bars(&closes);
    for (bar, &(_, volume)) in bars.iter_mut().zip(closes_volumes) {
        bar.volume = volume;
    }
    bars
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Interval, Series};

    #[test]
    fn indicator_set_insert_and_get() {
        let mut set = IndicatorSet::new();
        set.insert(
            "sma_50",
            vec![f64::NAN; 49].into_iter().chain([100.0, 101.0]).collect(),
        );
        assert!(set.get("sma_50", 0).unwrap().is_nan());
        assert_eq!(set.get("sma_50", 49), Some(100.0));
        assert_eq!(set.get("sma_50", 50), Some(101.0));
        assert_eq!(set.get("sma_50", 51), None); // out of bounds
    }

    #[test]
    fn latest_defined_skips_warmup_nan() {
        let mut set = IndicatorSet::new();
        set.insert("rsi_14", vec![f64::NAN, f64::NAN]);
        assert_eq!(set.latest_defined("rsi_14"), None);
        set.insert("vwap", vec![100.0, 101.0]);
        assert_eq!(set.latest_defined("vwap"), Some(101.0));
        assert_eq!(set.latest_defined("nonexistent"), None);
    }

    #[test]
    fn series_mean_ignores_nan() {
        let mut set = IndicatorSet::new();
        set.insert("atr_14", vec![f64::NAN, 2.0, 4.0]);
        assert_eq!(set.series_mean("atr_14"), Some(3.0));
        set.insert("empty", vec![f64::NAN]);
        assert_eq!(set.series_mean("empty"), None);
    }

    #[test]
    fn battery_outputs_align_with_series() {
        let bars = make_bars(&(0..60).map(|i| 100.0 + i as f64 * 0.2).collect::<Vec<_>>());
        let series = Series::new("TEST", Interval::Min5, bars).unwrap();
        let set = compute_indicators(&series);

        for key in [
            keys::RSI,
            keys::MACD,
            keys::MACD_SIGNAL,
            keys::VWAP,
            keys::BOLLINGER_UPPER,
            keys::STOCH_K,
            keys::STOCH_D,
            keys::SMA_50,
            keys::EMA_20,
            keys::ATR,
            keys::OBV,
        ] {
            let values = set.get_series(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(values.len(), series.len(), "misaligned series for {key}");
        }

        // 60 bars: rsi_14/vwap/macd defined at the end, sma_200 still warming up.
        assert!(set.latest_defined(keys::RSI).is_some());
        assert!(set.latest_defined(keys::VWAP).is_some());
        assert!(set.latest_defined(keys::SMA_200).is_none());
    }

    #[test]
    fn battery_on_empty_series_is_all_empty() {
        let series = Series::new("TEST", Interval::Min5, vec![]).unwrap();
        let set = compute_indicators(&series);
        assert!(!set.is_empty());
        assert_eq!(set.latest_defined(keys::RSI), None);
        assert_eq!(set.latest_defined(keys::VWAP), None);
    }
}
