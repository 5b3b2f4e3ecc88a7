//! Per-interval signal scoring.
//!
//! Evaluates the latest bar of a series against its indicator values and
//! candle pattern, appending one `Signal` per rule in a fixed order and
//! summing their deltas into an integer score. The score maps to a
//! `Verdict` via the configured thresholds.
//!
//! Missing data is a value, not a failure: any undefined input yields a
//! single "insufficient data" signal and a HOLD verdict.

pub mod aggregate;
pub mod readout;

pub use aggregate::aggregate_across_intervals;
pub use readout::{indicator_readout, readout_consensus, Bias, ReadoutRow};

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::domain::{Series, Signal, Verdict};
use crate::indicators::{keys, IndicatorSet};
use crate::patterns::CandlePattern;

pub const INSUFFICIENT_DATA: &str = "insufficient data";

/// Scored findings for one (symbol, interval) pair at the latest bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    pub signals: Vec<Signal>,
    pub score: i32,
    pub verdict: Verdict,
}

impl SignalReport {
    /// The recovered InsufficientData state: one explanatory signal, HOLD.
    pub fn insufficient_data() -> Self {
        Self {
            signals: vec![Signal::new(INSUFFICIENT_DATA, 0)],
            score: 0,
            verdict: Verdict::Hold,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.signals.len() == 1 && self.signals[0].label == INSUFFICIENT_DATA
    }
}

/// Score the latest bar of a series.
///
/// `indicators` and `patterns` must come from the same series (aligned by
/// position); `compute_indicators` and `detect_patterns` produce them.
/// Pure: the same inputs always yield the same report.
pub fn score_signals(
    series: &Series,
    indicators: &IndicatorSet,
    patterns: &[CandlePattern],
    config: &ScoringConfig,
) -> SignalReport {
    let latest = match series.latest() {
        Some(bar) => bar,
        None => return SignalReport::insufficient_data(),
    };

    let (rsi, vwap, macd, macd_signal) = match (
        indicators.latest_defined(keys::RSI),
        indicators.latest_defined(keys::VWAP),
        indicators.latest_defined(keys::MACD),
        indicators.latest_defined(keys::MACD_SIGNAL),
    ) {
        (Some(r), Some(v), Some(m), Some(s)) => (r, v, m, s),
        _ => return SignalReport::insufficient_data(),
    };

    let close = latest.close;
    if close.is_nan() {
        return SignalReport::insufficient_data();
    }
    let pattern = patterns.last().copied().unwrap_or(CandlePattern::None);

    let mut signals = Vec::new();
    let mut score = 0;
    let mut push = |label: String, delta: i32| {
        score += delta;
        signals.push(Signal::new(label, delta));
    };

    // Rule order is fixed: RSI, VWAP, MACD, pattern.
    if rsi < config.rsi_oversold {
        push(format!("RSI < {} (oversold, buy)", config.rsi_oversold), 1);
    } else if rsi > config.rsi_overbought {
        push(
            format!("RSI > {} (overbought, sell)", config.rsi_overbought),
            -1,
        );
    } else {
        push("RSI neutral".to_string(), 0);
    }

    if close > vwap {
        push("price above VWAP".to_string(), 1);
    } else {
        push("price below VWAP".to_string(), -1);
    }

    if macd > macd_signal {
        push("MACD bullish".to_string(), 1);
    } else {
        push("MACD bearish".to_string(), -1);
    }

    match pattern {
        CandlePattern::Hammer => push("hammer pattern".to_string(), 1),
        CandlePattern::BullishEngulfing => push("bullish engulfing pattern".to_string(), 1),
        CandlePattern::BearishEngulfing => push("bearish engulfing pattern".to_string(), -1),
        CandlePattern::Doji => push("doji (neutral pattern)".to_string(), 0),
        CandlePattern::None => {}
    }

    let verdict = if score >= config.buy_score {
        Verdict::Buy
    } else if score <= config.sell_score {
        Verdict::Sell
    } else {
        Verdict::Hold
    };

    SignalReport {
        signals,
        score,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use crate::indicators::make_bars;

    fn series_of(closes: &[f64]) -> Series {
        Series::new("TEST", Interval::Min5, make_bars(closes)).unwrap()
    }

    /// IndicatorSet with hand-picked latest values for threshold tests.
    fn fixed_indicators(n: usize, rsi: f64, vwap: f64, macd: f64, macd_signal: f64) -> IndicatorSet {
        let mut set = IndicatorSet::new();
        let pad = |v: f64| {
            let mut values = vec![f64::NAN; n.saturating_sub(1)];
            values.push(v);
            values
        };
        set.insert(keys::RSI, pad(rsi));
        set.insert(keys::VWAP, pad(vwap));
        set.insert(keys::MACD, pad(macd));
        set.insert(keys::MACD_SIGNAL, pad(macd_signal));
        set
    }

    #[test]
    fn all_bullish_scores_buy() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        // close 102 > vwap, rsi oversold, macd above signal → score 3
        let set = fixed_indicators(3, 25.0, 100.0, 1.0, 0.5);
        let report = score_signals(&series, &set, &[], &ScoringConfig::default());
        assert_eq!(report.score, 3);
        assert_eq!(report.verdict, Verdict::Buy);
        assert_eq!(report.signals.len(), 3);
    }

    #[test]
    fn all_bearish_scores_sell() {
        let series = series_of(&[102.0, 101.0, 100.0]);
        let set = fixed_indicators(3, 75.0, 101.0, -1.0, -0.5);
        let report = score_signals(&series, &set, &[], &ScoringConfig::default());
        assert_eq!(report.score, -3);
        assert_eq!(report.verdict, Verdict::Sell);
    }

    #[test]
    fn verdict_boundaries_exact() {
        let cases = [
            // (rsi, vwap_below_close, macd_bull, pattern, expected_score, verdict)
            (25.0, true, true, CandlePattern::None, 3, Verdict::Buy),
            (50.0, true, true, CandlePattern::None, 2, Verdict::Buy),
            (50.0, true, false, CandlePattern::None, 0, Verdict::Hold),
            (50.0, false, true, CandlePattern::None, 0, Verdict::Hold),
            (50.0, false, false, CandlePattern::None, -2, Verdict::Sell),
            (25.0, false, false, CandlePattern::None, -1, Verdict::Hold),
            (75.0, true, false, CandlePattern::None, -1, Verdict::Hold),
            (50.0, true, true, CandlePattern::BearishEngulfing, 1, Verdict::Hold),
        ];
        for (rsi, above_vwap, macd_bull, pattern, expected_score, expected_verdict) in cases {
            let series = series_of(&[100.0, 101.0, 102.0]);
            let vwap = if above_vwap { 100.0 } else { 200.0 };
            let (macd, sig) = if macd_bull { (1.0, 0.5) } else { (0.5, 1.0) };
            let set = fixed_indicators(3, rsi, vwap, macd, sig);
            let patterns = vec![CandlePattern::None, CandlePattern::None, pattern];
            let report = score_signals(&series, &set, &patterns, &ScoringConfig::default());
            assert_eq!(report.score, expected_score, "rsi={rsi} case");
            assert_eq!(report.verdict, expected_verdict, "rsi={rsi} case");
        }
    }

    #[test]
    fn pattern_deltas() {
        for (pattern, delta) in [
            (CandlePattern::Hammer, 1),
            (CandlePattern::BullishEngulfing, 1),
            (CandlePattern::BearishEngulfing, -1),
            (CandlePattern::Doji, 0),
        ] {
            let series = series_of(&[100.0, 101.0, 102.0]);
            let set = fixed_indicators(3, 50.0, 100.0, 1.0, 0.5);
            let report = score_signals(
                &series,
                &set,
                &[CandlePattern::None, CandlePattern::None, pattern],
                &ScoringConfig::default(),
            );
            // Base score without pattern: 0 + 1 + 1 = 2
            assert_eq!(report.score, 2 + delta, "{pattern:?}");
            assert_eq!(report.signals.len(), 4, "{pattern:?}");
        }
    }

    #[test]
    fn no_pattern_appends_no_signal() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let set = fixed_indicators(3, 50.0, 100.0, 1.0, 0.5);
        let report = score_signals(
            &series,
            &set,
            &[CandlePattern::None; 3],
            &ScoringConfig::default(),
        );
        assert_eq!(report.signals.len(), 3);
    }

    #[test]
    fn empty_series_is_insufficient() {
        let series = Series::new("TEST", Interval::Min5, vec![]).unwrap();
        let report = score_signals(
            &series,
            &IndicatorSet::new(),
            &[],
            &ScoringConfig::default(),
        );
        assert!(report.is_insufficient());
        assert_eq!(report.verdict, Verdict::Hold);
        assert_eq!(report.signals.len(), 1);
    }

    #[test]
    fn warmup_not_reached_is_insufficient() {
        // 5 bars cannot warm up RSI(14); the real battery yields NaN there.
        let series = series_of(&[100.0, 101.0, 102.0, 101.5, 102.5]);
        let set = crate::indicators::compute_indicators(&series);
        let patterns = crate::patterns::detect_patterns(&series);
        let report = score_signals(&series, &set, &patterns, &ScoringConfig::default());
        assert!(report.is_insufficient());
        assert_eq!(report.verdict, Verdict::Hold);
    }

    #[test]
    fn scoring_is_pure() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let series = series_of(&closes);
        let set = crate::indicators::compute_indicators(&series);
        let patterns = crate::patterns::detect_patterns(&series);
        let cfg = ScoringConfig::default();
        let a = score_signals(&series, &set, &patterns, &cfg);
        let b = score_signals(&series, &set, &patterns, &cfg);
        assert_eq!(a.score, b.score);
        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.signals, b.signals);
    }
}
