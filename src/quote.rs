//! Quote source trait and structured error types.
//!
//! The engine never fetches anything itself; a `QuoteSource` collaborator
//! hands it validated series. The trait exists so callers can plug in a
//! real provider, a cache, or a test stub, and so fetch failures can be
//! folded into the insufficient-data path by the evaluation facade.

use thiserror::Error;

use crate::domain::{Interval, Series, SeriesError};

/// Structured errors a quote source can surface.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    /// The provider returned bars that fail series validation. Unlike the
    /// transient variants this is a data-quality error and aborts the
    /// request instead of degrading to a HOLD verdict.
    #[error("malformed data from provider: {0}")]
    MalformedData(#[from] SeriesError),

    #[error("quote error: {0}")]
    Other(String),
}

impl QuoteError {
    /// Transient failures degrade to "insufficient data"; malformed data
    /// must abort with a diagnostic instead.
    pub fn is_data_quality(&self) -> bool {
        matches!(self, QuoteError::MalformedData(_))
    }
}

/// Trait for quote sources.
///
/// `lookback` is the maximum number of most-recent bars wanted; a source
/// may return fewer (the engine then reports insufficient data rather than
/// erroring).
pub trait QuoteSource: Send + Sync {
    fn fetch(&self, symbol: &str, interval: Interval, lookback: usize)
        -> Result<Series, QuoteError>;
}
