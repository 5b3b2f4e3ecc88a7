//! Volume-Weighted Average Price (VWAP).
//!
//! Cumulative sum of typical_price * volume divided by cumulative volume,
//! anchored at the first bar of the series. The engine never resets VWAP
//! mid-series; the caller scopes the series to the desired anchor period
//! (typically one trading day). Lookback: 0, but a bar is undefined while
//! cumulative volume is still zero.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Vwap {
    name: String,
}

impl Vwap {
    pub fn new() -> Self {
        Self {
            name: "vwap".to_string(),
        }
    }
}

impl Default for Vwap {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        let mut cum_pv = 0.0;
        let mut cum_volume = 0.0;

        for (i, bar) in bars.iter().enumerate() {
            let tp = bar.typical_price();
            if tp.is_nan() || bar.volume.is_nan() {
                // Cumulative state is tainted from here on.
                return result;
            }
            cum_pv += tp * bar.volume;
            cum_volume += bar.volume;
            if cum_volume > 0.0 {
                result[i] = cum_pv / cum_volume;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, make_bars_with_volume, DEFAULT_EPSILON};

    #[test]
    fn vwap_single_bar_is_typical_price() {
        let bars = make_bars(&[100.0]);
        let result = Vwap::new().compute(&bars);
        assert_approx(result[0], bars[0].typical_price(), DEFAULT_EPSILON);
    }

    #[test]
    fn vwap_weights_by_volume() {
        let mut bars = make_bars_with_volume(&[(100.0, 100.0), (110.0, 300.0)]);
        // Pin typical prices to the close for easy arithmetic.
        for bar in &mut bars {
            bar.high = bar.close;
            bar.low = bar.close;
            bar.open = bar.close;
        }
        let result = Vwap::new().compute(&bars);
        // (100*100 + 110*300) / 400 = 107.5
        assert_approx(result[1], 107.5, DEFAULT_EPSILON);
    }

    #[test]
    fn vwap_undefined_while_volume_is_zero() {
        let bars = make_bars_with_volume(&[(100.0, 0.0), (101.0, 0.0), (102.0, 500.0)]);
        let result = Vwap::new().compute(&bars);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(!result[2].is_nan());
    }

    #[test]
    fn vwap_tracks_running_average() {
        let bars = make_bars(&[100.0, 102.0, 104.0]);
        let result = Vwap::new().compute(&bars);
        // Equal volumes → VWAP is the running mean of typical prices.
        let expected =
            (bars[0].typical_price() + bars[1].typical_price() + bars[2].typical_price()) / 3.0;
        assert_approx(result[2], expected, DEFAULT_EPSILON);
    }

    #[test]
    fn vwap_empty_series() {
        let result = Vwap::new().compute(&[]);
        assert!(result.is_empty());
    }
}
