//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(close, fast) - EMA(close, slow)
//! Signal line = EMA(MACD line, signal)
//!
//! Both EMAs are seeded with the first value (EMA[0] = value[0]) rather
//! than an SMA seed, so the lines are defined from bar 0. Early values are
//! dominated by the seed and settle once the slow window has passed, which
//! matches the recursive-smoothing convention used by common charting
//! stacks. Lookback: 0.

use super::Indicator;
use crate::domain::Bar;

/// Which MACD output series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, output: MacdOutput) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be < slow period");
        let name = match output {
            MacdOutput::Line => format!("macd_{fast}_{slow}"),
            MacdOutput::Signal => format!("macd_signal_{fast}_{slow}_{signal}"),
        };
        Self {
            fast,
            slow,
            signal,
            output,
            name,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let fast = ema_seed_first(&closes, self.fast);
        let slow = ema_seed_first(&closes, self.slow);
        let line: Vec<f64> = fast
            .iter()
            .zip(&slow)
            .map(|(&f, &s)| f - s)
            .collect();

        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => ema_seed_first(&line, self.signal),
        }
    }
}

/// Recursive EMA seeded with the first value: EMA[0] = values[0].
///
/// Defined for every index; a NaN input taints all later values.
pub fn ema_seed_first(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 || period == 0 {
        return result;
    }
    if values[0].is_nan() {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    result[0] = values[0];
    let mut prev = values[0];
    for i in 1..n {
        if values[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}
