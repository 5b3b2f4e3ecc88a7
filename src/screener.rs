//! Swing-setup screen over daily series.
//!
//! A stock qualifies as a swing setup when three conditions line up at the
//! latest bar: price trading above both EMA20 and EMA50 (uptrend), volume
//! above 1.5x its 10-bar average (spike), and RSI(14) in the 45..=65 zone
//! (momentum without exhaustion). Anything else is "watching". The screen
//! also labels the EMA trend bias (strong up/down, weak pullback,
//! sideways) for the table view.

use serde::{Deserialize, Serialize};

use crate::domain::Series;
use crate::indicators::{ema_of_series, keys, Indicator, IndicatorSet, Rsi, RSI_WINDOW};

/// Minimum bars before the screen produces an answer (EMA50 warmup plus
/// slack).
pub const MIN_BARS: usize = 30;

const VOLUME_SPIKE_RATIO: f64 = 1.5;
const AVG_VOLUME_WINDOW: usize = 10;
const RSI_ZONE: (f64, f64) = (45.0, 65.0);

/// Screen outcome for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingSignal {
    Setup,
    Watching,
}

/// Categorical EMA trend at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmaTrend {
    /// Price above EMA20 and EMA20 above EMA50.
    StrongUptrend,
    /// Price below EMA20 and EMA20 below EMA50.
    StrongDowntrend,
    /// Price above EMA20 but still under EMA50.
    WeakPullback,
    /// Everything else.
    Sideways,
}

impl EmaTrend {
    pub fn classify(price: f64, ema20: f64, ema50: f64) -> Self {
        if price > ema20 && ema20 > ema50 {
            EmaTrend::StrongUptrend
        } else if price < ema20 && ema20 < ema50 {
            EmaTrend::StrongDowntrend
        } else if price > ema20 && price < ema50 {
            EmaTrend::WeakPullback
        } else {
            EmaTrend::Sideways
        }
    }
}

/// Full screen row: the latest-bar readings plus the derived flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwingScreen {
    pub last_close: f64,
    /// Percent change from the latest bar's open to its close.
    pub price_change_pct: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub rsi: f64,
    pub volume: f64,
    pub avg_volume_10: f64,
    /// EMA20 - EMA50, the trend bias.
    pub ema_difference: f64,
    /// Trend bias as a percent of the last close.
    pub ema_difference_pct: f64,
    pub ema_trend: EmaTrend,
    pub uptrend: bool,
    pub volume_spike: bool,
    pub rsi_in_zone: bool,
    pub signal: SwingSignal,
}

/// Run the swing screen on a (typically daily) series.
///
/// Returns `None` when the series is too short or any required value is
/// still undefined — the screener skips such symbols rather than erroring.
pub fn screen_swing_setup(series: &Series) -> Option<SwingScreen> {
    if series.len() < MIN_BARS {
        return None;
    }
    let bars = series.bars();

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema20 = *ema_of_series(&closes, 20).last()?;
    let ema50 = *ema_of_series(&closes, 50).last()?;
    let rsi = *Rsi::new(RSI_WINDOW).compute(bars).last()?;

    build_screen(series, ema20, ema50, rsi)
}

/// Screen using a precomputed battery: reads the latest EMA20/EMA50/RSI
/// out of `indicators` instead of recomputing them. The battery runs the
/// same indicator code, so the two entry points agree on any series.
pub fn screen_with_battery(series: &Series, indicators: &IndicatorSet) -> Option<SwingScreen> {
    if series.len() < MIN_BARS {
        return None;
    }
    let ema20 = indicators.latest_defined(keys::EMA_20)?;
    let ema50 = indicators.latest_defined(keys::EMA_50)?;
    let rsi = indicators.latest_defined(keys::RSI)?;

    build_screen(series, ema20, ema50, rsi)
}

fn build_screen(series: &Series, ema20: f64, ema50: f64, rsi: f64) -> Option<SwingScreen> {
    if ema20.is_nan() || ema50.is_nan() || rsi.is_nan() {
        return None;
    }
    let latest = series.latest()?;
    let bars = series.bars();

    let avg_volume_10 = {
        let window = &bars[bars.len() - AVG_VOLUME_WINDOW..];
        window.iter().map(|b| b.volume).sum::<f64>() / AVG_VOLUME_WINDOW as f64
    };
    if avg_volume_10.is_nan() {
        return None;
    }

    let last_close = latest.close;
    let volume = latest.volume;
    let uptrend = last_close > ema20 && last_close > ema50;
    let volume_spike = volume > VOLUME_SPIKE_RATIO * avg_volume_10;
    let rsi_in_zone = (RSI_ZONE.0..=RSI_ZONE.1).contains(&rsi);

    let signal = if uptrend && volume_spike && rsi_in_zone {
        SwingSignal::Setup
    } else {
        SwingSignal::Watching
    };

    Some(SwingScreen {
        last_close,
        price_change_pct: (last_close - latest.open) / latest.open * 100.0,
        ema20,
        ema50,
        rsi,
        volume,
        avg_volume_10,
        ema_difference: ema20 - ema50,
        ema_difference_pct: (ema20 - ema50) / last_close * 100.0,
        ema_trend: EmaTrend::classify(last_close, ema20, ema50),
        uptrend,
        volume_spike,
        rsi_in_zone,
        signal,
    })
}
