//! On-Balance Volume (OBV).
//!
//! Cumulative signed volume: +volume when close > prev_close, -volume when
//! close < prev_close, unchanged when equal. OBV[0] = 0 (the first bar has
//! no direction). Lookback: 0.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Obv {
    name: String,
}

impl Obv {
    pub fn new() -> Self {
        Self {
            name: "obv".to_string(),
        }
    }
}

impl Default for Obv {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n == 0 {
            return result;
        }
        if bars[0].close.is_nan() || bars[0].volume.is_nan() {
            return result;
        }

        let mut obv = 0.0;
        result[0] = obv;

        for i in 1..n {
            let curr = bars[i].close;
            let prev = bars[i - 1].close;
            let volume = bars[i].volume;
            if curr.is_nan() || prev.is_nan() || volume.is_nan() {
                // Cumulative state is tainted from here on.
                return result;
            }
            if curr > prev {
                obv += volume;
            } else if curr < prev {
                obv -= volume;
            }
            result[i] = obv;
        }

        result
    }
}
