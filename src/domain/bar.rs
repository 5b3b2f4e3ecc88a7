//! Bar — the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol at one interval timestamp.
///
/// Timestamps carry intraday resolution because the engine scores 1m/5m/15m
/// series as well as daily ones. Volume is `f64`: some venues report
/// fractional volume and VWAP/OBV arithmetic works in floating point anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Typical price: (high + low + close) / 3. Used by VWAP.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Candle body: |close - open|.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full candle range: high - low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if any price or volume field is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite())
    }

    /// Basic OHLCV sanity check: prices positive, high >= max(open, close),
    /// low <= min(open, close), volume >= 0.
    pub fn is_sane(&self) -> bool {
        self.malformed_reason().is_none()
    }

    /// Why this bar is malformed, or `None` if it is well-formed.
    ///
    /// Checked at `Series` construction so indicator code never sees a bar
    /// with an inverted high/low or a close outside the bar's range.
    pub fn malformed_reason(&self) -> Option<&'static str> {
        if self.has_non_finite() {
            return Some("non-finite OHLCV value");
        }
        if self.open <= 0.0 || self.high <= 0.0 || self.low <= 0.0 || self.close <= 0.0 {
            return Some("non-positive price");
        }
        if self.high < self.low {
            return Some("high below low");
        }
        if self.high < self.open.max(self.close) {
            return Some("high below max(open, close)");
        }
        if self.low > self.open.min(self.close) {
            return Some("low above min(open, close)");
        }
        if self.volume < 0.0 {
            return Some("negative volume");
        }
        None
    }
}
