//! Stochastic Oscillator (%K and %D).
//!
//! %K = 100 * (close - lowest_low(window)) / (highest_high(window) - lowest_low(window))
//! %D = SMA(%K, smooth)
//!
//! A zero-range window (highest_high == lowest_low) leaves %K undefined for
//! that bar instead of dividing by zero.
//! Lookback: window - 1 for %K, window - 1 + smooth - 1 for %D.

use super::Indicator;
use crate::domain::Bar;

/// Which oscillator line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticOutput {
    PercentK,
    PercentD,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    window: usize,
    smooth: usize,
    output: StochasticOutput,
    name: String,
}

impl Stochastic {
    pub fn percent_k(window: usize, smooth: usize) -> Self {
        assert!(window >= 1 && smooth >= 1, "Stochastic periods must be >= 1");
        Self {
            window,
            smooth,
            output: StochasticOutput::PercentK,
            name: format!("stoch_k_{window}"),
        }
    }

    pub fn percent_d(window: usize, smooth: usize) -> Self {
        assert!(window >= 1 && smooth >= 1, "Stochastic periods must be >= 1");
        Self {
            window,
            smooth,
            output: StochasticOutput::PercentD,
            name: format!("stoch_d_{window}_{smooth}"),
        }
    }

    fn raw_percent_k(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.window {
            return result;
        }

        for i in (self.window - 1)..n {
            let window = &bars[(i + 1 - self.window)..=i];

            let mut lowest = f64::INFINITY;
            let mut highest = f64::NEG_INFINITY;
            let mut has_nan = false;
            for bar in window {
                if bar.high.is_nan() || bar.low.is_nan() {
                    has_nan = true;
                    break;
                }
                lowest = lowest.min(bar.low);
                highest = highest.max(bar.high);
            }
            let close = bars[i].close;
            if has_nan || close.is_nan() {
                continue;
            }

            let range = highest - lowest;
            if range == 0.0 {
                // Zero-range window: %K undefined for this bar.
                continue;
            }
            result[i] = 100.0 * (close - lowest) / range;
        }

        result
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            StochasticOutput::PercentK => self.window - 1,
            StochasticOutput::PercentD => self.window - 1 + self.smooth - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let k = self.raw_percent_k(bars);
        match self.output {
            StochasticOutput::PercentK => k,
            StochasticOutput::PercentD => sma_of_series(&k, self.smooth),
        }
    }
}

/// Rolling mean over a plain f64 slice; windows containing NaN are NaN.
fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        let mut sum = 0.0;
        let mut has_nan = false;
        for &v in window {
            if v.is_nan() {
                has_nan = true;
                break;
            }
            sum += v;
        }
        if !has_nan {
            result[i] = sum / period as f64;
        }
    }

    result
}
