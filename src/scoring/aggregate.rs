//! Cross-interval weighted aggregation.
//!
//! A pure reduction over independently computed per-interval verdicts:
//! total = Σ weight(interval) * direction(verdict), where BUY is +1, SELL
//! is -1 and HOLD is 0. Commutative, so the outcome never depends on map
//! iteration order.

use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::domain::{Interval, Verdict, WeightedVerdict};

fn direction(verdict: Verdict) -> f64 {
    match verdict {
        Verdict::Buy => 1.0,
        Verdict::Sell => -1.0,
        Verdict::Hold => 0.0,
    }
}

/// Weighted sum of the per-interval verdicts.
pub fn weighted_total(verdicts: &HashMap<Interval, Verdict>, config: &ScoringConfig) -> f64 {
    verdicts
        .iter()
        .map(|(&interval, &verdict)| config.weight_for(interval) * direction(verdict))
        .sum()
}

/// Combine per-interval verdicts into one overall recommendation.
pub fn aggregate_across_intervals(
    verdicts: &HashMap<Interval, Verdict>,
    config: &ScoringConfig,
) -> WeightedVerdict {
    let total = weighted_total(verdicts, config);
    if total >= config.strong_threshold {
        WeightedVerdict::StrongBuy
    } else if total <= -config.strong_threshold {
        WeightedVerdict::StrongSell
    } else {
        WeightedVerdict::HoldWait
    }
}
