//! signalcore — intraday/swing technical signal engine.
//!
//! Pure function pipeline: OHLCV series → indicator series → candle
//! pattern labels → weighted categorical verdict.
//!
//! - Domain types (bars, validated series, intervals, verdicts)
//! - Indicator battery (RSI, MACD, VWAP, Bollinger, Stochastic, SMA/EMA,
//!   ATR, OBV) with explicit warmup semantics
//! - Candlestick pattern detection with a fixed priority order
//! - Per-interval signal scoring and the cross-interval weighted verdict
//! - Quote source seam with a structured error taxonomy
//!
//! The engine owns no I/O, persistence, or concurrency: every evaluation
//! is an independent, allocation-local call, so callers may fan out over
//! symbols and intervals from any worker pool they like.

pub mod config;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod patterns;
pub mod quote;
pub mod screener;
pub mod scoring;
