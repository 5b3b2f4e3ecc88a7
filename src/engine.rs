//! Evaluation facade: one (symbol, interval) in, reports out.
//!
//! `evaluate_series` is the independent, side-effect-free unit of work —
//! allocation-local, no shared state, safe to call concurrently from a
//! worker pool, one call per (symbol, interval). `evaluate_symbol` runs it
//! across a set of intervals through a `QuoteSource` and folds the
//! per-interval verdicts into the weighted overall recommendation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::domain::{Interval, Series, Signal, Verdict, WeightedVerdict};
use crate::indicators::{compute_indicators, keys, IndicatorSet};
use crate::patterns::{detect_patterns, CandlePattern};
use crate::quote::{QuoteError, QuoteSource};
use crate::scoring::{score_signals, SignalReport};

/// Latest-bar indicator values rendered next to the verdict. `None` for
/// anything still inside its warmup window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub vwap: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

impl IndicatorSnapshot {
    fn from_set(set: &IndicatorSet) -> Self {
        Self {
            rsi: set.latest_defined(keys::RSI),
            vwap: set.latest_defined(keys::VWAP),
            macd: set.latest_defined(keys::MACD),
            macd_signal: set.latest_defined(keys::MACD_SIGNAL),
        }
    }

    fn empty() -> Self {
        Self {
            rsi: None,
            vwap: None,
            macd: None,
            macd_signal: None,
        }
    }
}

/// Full evaluation of one (symbol, interval): the dashboard table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalReport {
    pub interval: Interval,
    pub last_close: Option<f64>,
    pub snapshot: IndicatorSnapshot,
    pub pattern: CandlePattern,
    pub signals: Vec<Signal>,
    pub score: i32,
    pub verdict: Verdict,
}

impl IntervalReport {
    /// Recovered state for a fetch failure or an unusable series.
    pub fn insufficient_data(interval: Interval) -> Self {
        let report = SignalReport::insufficient_data();
        Self {
            interval,
            last_close: None,
            snapshot: IndicatorSnapshot::empty(),
            pattern: CandlePattern::None,
            signals: report.signals,
            score: report.score,
            verdict: report.verdict,
        }
    }
}

/// Multi-interval summary for one symbol plus the weighted overall verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSummary {
    pub symbol: String,
    pub intervals: Vec<IntervalReport>,
    pub overall: WeightedVerdict,
}

/// Evaluate one series end to end: indicators, patterns, scored signals.
pub fn evaluate_series(series: &Series, config: &ScoringConfig) -> IntervalReport {
    let indicators = compute_indicators(series);
    let patterns = detect_patterns(series);
    let report = score_signals(series, &indicators, &patterns, config);

    IntervalReport {
        interval: series.interval(),
        last_close: series.latest().map(|bar| bar.close),
        snapshot: IndicatorSnapshot::from_set(&indicators),
        pattern: patterns.last().copied().unwrap_or(CandlePattern::None),
        signals: report.signals,
        score: report.score,
        verdict: report.verdict,
    }
}

/// Evaluate a symbol across intervals through a quote source.
///
/// Transient fetch failures (network, unknown symbol, rate limit) degrade
/// that interval to its insufficient-data report; malformed provider data
/// aborts the whole request with a diagnostic, per the error taxonomy.
pub fn evaluate_symbol(
    source: &dyn QuoteSource,
    symbol: &str,
    intervals: &[Interval],
    lookback: usize,
    config: &ScoringConfig,
) -> Result<SymbolSummary, QuoteError> {
    let mut reports = Vec::with_capacity(intervals.len());
    let mut verdicts: HashMap<Interval, Verdict> = HashMap::new();

    for &interval in intervals {
        let report = match source.fetch(symbol, interval, lookback) {
            Ok(series) => evaluate_series(&series, config),
            Err(err) if err.is_data_quality() => return Err(err),
            Err(_) => IntervalReport::insufficient_data(interval),
        };
        verdicts.insert(interval, report.verdict);
        reports.push(report);
    }

    let overall = crate::scoring::aggregate_across_intervals(&verdicts, config);

    Ok(SymbolSummary {
        symbol: symbol.to_string(),
        intervals: reports,
        overall,
    })
}
