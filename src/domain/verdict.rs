//! Verdict types and scored signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-interval trade recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Buy => "BUY",
            Verdict::Sell => "SELL",
            Verdict::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// Recommendation after combining per-interval verdicts with weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightedVerdict {
    StrongBuy,
    StrongSell,
    HoldWait,
}

impl fmt::Display for WeightedVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WeightedVerdict::StrongBuy => "STRONG BUY",
            WeightedVerdict::StrongSell => "STRONG SELL",
            WeightedVerdict::HoldWait => "HOLD / WAIT",
        };
        f.write_str(s)
    }
}

/// One human-readable finding with its signed score contribution.
///
/// Scoring rules append these in a fixed order; the summed `delta` drives
/// the per-interval `Verdict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub label: String,
    pub delta: i32,
}

impl Signal {
    pub fn new(label: impl Into<String>, delta: i32) -> Self {
        Self {
            label: label.into(),
            delta,
        }
    }
}
