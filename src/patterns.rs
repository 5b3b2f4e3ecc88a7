//! Candlestick pattern detection.
//!
//! Each bar is classified from its own OHLC and, for engulfing patterns,
//! its immediate predecessor. Classification is local: the label at bar i
//! never depends on bars beyond i-1.
//!
//! Evaluation order is fixed and significant: Doji, then Hammer, then the
//! engulfing patterns. A bar satisfying several conditions gets the first
//! match in that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Bar, Series};

/// Flat candles below this range are unclassifiable.
pub const RANGE_EPSILON: f64 = 1e-6;

/// Doji body threshold as a fraction of the candle range.
const DOJI_BODY_FRACTION: f64 = 0.1;

/// Categorical candle label. `None` means no recognized pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandlePattern {
    None,
    Doji,
    Hammer,
    BullishEngulfing,
    BearishEngulfing,
}

impl fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CandlePattern::None => "None",
            CandlePattern::Doji => "Doji",
            CandlePattern::Hammer => "Hammer",
            CandlePattern::BullishEngulfing => "Bullish Engulfing",
            CandlePattern::BearishEngulfing => "Bearish Engulfing",
        };
        f.write_str(s)
    }
}

/// Classify one bar given its predecessor (if any).
pub fn classify(bar: &Bar, prev: Option<&Bar>) -> CandlePattern {
    let body = bar.body();
    let range = bar.range();

    if range.abs() < RANGE_EPSILON {
        return CandlePattern::None;
    }

    if body < DOJI_BODY_FRACTION * range {
        return CandlePattern::Doji;
    }

    if bar.close > bar.open && (bar.open - bar.low) > 2.0 * body && (bar.high - bar.close) < body {
        return CandlePattern::Hammer;
    }

    if let Some(prev) = prev {
        let prev_bearish = prev.close < prev.open;
        let prev_bullish = prev.close > prev.open;

        if prev_bearish
            && bar.close > bar.open
            && bar.close > prev.open
            && bar.open < prev.close
        {
            return CandlePattern::BullishEngulfing;
        }
        if prev_bullish
            && bar.close < bar.open
            && bar.close < prev.open
            && bar.open > prev.close
        {
            return CandlePattern::BearishEngulfing;
        }
    }

    CandlePattern::None
}

/// Classify every bar of a series. Output is aligned 1:1 with the bars.
pub fn detect_patterns(series: &Series) -> Vec<CandlePattern> {
    let bars = series.bars();
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let prev = if i > 0 { Some(&bars[i - 1]) } else { None };
            classify(bar, prev)
        })
        .collect()
}
