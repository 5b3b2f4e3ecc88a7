//! Bar interval labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unrecognized interval label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interval label: {0}")]
pub struct ParseIntervalError(pub String);

/// Supported bar intervals, named after the quote-source labels
/// ("1m", "5m", "15m", "1h", "1d", "1wk").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1wk")]
    Week1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Min1 => "1m",
            Interval::Min5 => "5m",
            Interval::Min15 => "15m",
            Interval::Hour1 => "1h",
            Interval::Day1 => "1d",
            Interval::Week1 => "1wk",
        }
    }

    /// The intraday set scored by the multi-interval summary.
    pub fn intraday() -> [Interval; 3] {
        [Interval::Min1, Interval::Min5, Interval::Min15]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::Min1),
            "5m" => Ok(Interval::Min5),
            "15m" => Ok(Interval::Min15),
            "1h" | "60m" => Ok(Interval::Hour1),
            "1d" => Ok(Interval::Day1),
            "1wk" => Ok(Interval::Week1),
            other => Err(ParseIntervalError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_roundtrips_through_label() {
        for iv in [
            Interval::Min1,
            Interval::Min5,
            Interval::Min15,
            Interval::Hour1,
            Interval::Day1,
            Interval::Week1,
        ] {
            assert_eq!(iv.as_str().parse::<Interval>().unwrap(), iv);
        }
    }

    #[test]
    fn interval_serde_uses_labels() {
        let json = serde_json::to_string(&Interval::Min15).unwrap();
        assert_eq!(json, "\"15m\"");
        let back: Interval = serde_json::from_str("\"5m\"").unwrap();
        assert_eq!(back, Interval::Min5);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "3m".parse::<Interval>().unwrap_err();
        assert_eq!(err, ParseIntervalError("3m".to_string()));
        assert_eq!(err.to_string(), "unknown interval label: 3m");
    }
}
