//! Series — validated, ordered bar history for one (symbol, interval).

use serde::Serialize;
use thiserror::Error;

use super::{Bar, Interval};

/// Structured errors raised at series construction.
///
/// These are data-quality failures, not recoverable "insufficient data"
/// states: a malformed bar means the quote source handed us garbage, and
/// the caller should see a diagnostic rather than a HOLD verdict.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("malformed bar at index {index}: {reason}")]
    MalformedBar { index: usize, reason: &'static str },

    #[error("bars out of order at index {index}: timestamps must be strictly ascending")]
    OutOfOrder { index: usize },

    #[error("duplicate timestamp at index {index}")]
    DuplicateTimestamp { index: usize },
}

/// Ordered OHLCV history for one symbol at one interval.
///
/// Construction validates every bar (see `Bar::malformed_reason`) and the
/// strict timestamp ordering, so downstream indicator code can assume a
/// clean series. Bars are immutable once inside; indicators produce
/// parallel derived vectors instead of mutating in place.
///
/// VWAP anchoring is the caller's concern: pass a series scoped to the
/// desired anchor period (e.g. one trading day) since VWAP accumulates
/// from the first bar of the series.
///
/// Deliberately not `Deserialize`: a series always enters the program
/// through `Series::new` so the validation cannot be skipped.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    symbol: String,
    interval: Interval,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a validated series. Bars must be strictly ascending by
    /// timestamp with no duplicates; every bar must be well-formed.
    pub fn new(
        symbol: impl Into<String>,
        interval: Interval,
        bars: Vec<Bar>,
    ) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if let Some(reason) = bar.malformed_reason() {
                return Err(SeriesError::MalformedBar { index, reason });
            }
        }
        for index in 1..bars.len() {
            let prev = bars[index - 1].timestamp;
            let curr = bars[index].timestamp;
            if curr == prev {
                return Err(SeriesError::DuplicateTimestamp { index });
            }
            if curr < prev {
                return Err(SeriesError::OutOfOrder { index });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            interval,
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar, if any. Scoring is evaluated here.
    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
