//! Per-indicator readout at the latest bar.
//!
//! Unlike the scored signals, the readout does not feed a verdict: it is
//! the row-per-indicator table the dashboards render next to the chart —
//! RSI bands, MACD vs its signal line, Bollinger touches, Stochastic
//! extremes, 50/200 golden/death crosses, ATR and OBV relative to their
//! own series means. An undefined input yields `Bias::Neutral` with a
//! "no signal" label rather than dropping the row. `readout_consensus`
//! reduces the table to the overall headline by majority vote.

use serde::{Deserialize, Serialize};

use crate::domain::Series;
use crate::indicators::{keys, IndicatorSet};

/// Directional lean of a single readout row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

/// One row of the indicator readout table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadoutRow {
    pub indicator: &'static str,
    pub label: String,
    pub bias: Bias,
}

impl ReadoutRow {
    fn new(indicator: &'static str, label: impl Into<String>, bias: Bias) -> Self {
        Self {
            indicator,
            label: label.into(),
            bias,
        }
    }

    fn no_signal(indicator: &'static str) -> Self {
        Self::new(indicator, "no signal", Bias::Neutral)
    }
}

/// Build the readout table for the latest bar of a series.
pub fn indicator_readout(series: &Series, indicators: &IndicatorSet) -> Vec<ReadoutRow> {
    let close = series.latest().map(|bar| bar.close);
    let mut rows = Vec::with_capacity(8);

    // RSI bands
    rows.push(match indicators.latest_defined(keys::RSI) {
        Some(rsi) if rsi < 30.0 => ReadoutRow::new("RSI", "buy (oversold)", Bias::Bullish),
        Some(rsi) if rsi > 70.0 => ReadoutRow::new("RSI", "sell (overbought)", Bias::Bearish),
        Some(_) => ReadoutRow::no_signal("RSI"),
        None => ReadoutRow::no_signal("RSI"),
    });

    // MACD vs signal line
    rows.push(
        match (
            indicators.latest_defined(keys::MACD),
            indicators.latest_defined(keys::MACD_SIGNAL),
        ) {
            (Some(m), Some(s)) if m > s => {
                ReadoutRow::new("MACD", "buy (above signal line)", Bias::Bullish)
            }
            (Some(m), Some(s)) if m < s => {
                ReadoutRow::new("MACD", "sell (below signal line)", Bias::Bearish)
            }
            _ => ReadoutRow::no_signal("MACD"),
        },
    );

    // Bollinger band touches
    rows.push(
        match (
            close,
            indicators.latest_defined(keys::BOLLINGER_LOWER),
            indicators.latest_defined(keys::BOLLINGER_UPPER),
        ) {
            (Some(c), Some(lower), _) if c < lower => {
                ReadoutRow::new("Bollinger Bands", "buy (below lower band)", Bias::Bullish)
            }
            (Some(c), _, Some(upper)) if c > upper => {
                ReadoutRow::new("Bollinger Bands", "sell (above upper band)", Bias::Bearish)
            }
            _ => ReadoutRow::no_signal("Bollinger Bands"),
        },
    );

    // Stochastic extremes: both lines must agree
    rows.push(
        match (
            indicators.latest_defined(keys::STOCH_K),
            indicators.latest_defined(keys::STOCH_D),
        ) {
            (Some(k), Some(d)) if k < 20.0 && d < 20.0 => {
                ReadoutRow::new("Stochastic", "buy (oversold)", Bias::Bullish)
            }
            (Some(k), Some(d)) if k > 80.0 && d > 80.0 => {
                ReadoutRow::new("Stochastic", "sell (overbought)", Bias::Bearish)
            }
            _ => ReadoutRow::no_signal("Stochastic"),
        },
    );

    // SMA and EMA 50/200 crosses
    rows.push(cross_row(
        "SMA 50/200",
        indicators.latest_defined(keys::SMA_50),
        indicators.latest_defined(keys::SMA_200),
    ));
    rows.push(cross_row(
        "EMA 50/200",
        indicators.latest_defined(keys::EMA_50),
        indicators.latest_defined(keys::EMA_200),
    ));

    // ATR vs its own mean: volatility regime, no direction
    rows.push(
        match (
            indicators.latest_defined(keys::ATR),
            indicators.series_mean(keys::ATR),
        ) {
            (Some(atr), Some(mean)) if atr > mean => {
                ReadoutRow::new("ATR", "high volatility", Bias::Neutral)
            }
            (Some(_), Some(_)) => ReadoutRow::new("ATR", "low volatility", Bias::Neutral),
            _ => ReadoutRow::no_signal("ATR"),
        },
    );

    // OBV vs its own mean: volume pressure
    rows.push(
        match (
            indicators.latest_defined(keys::OBV),
            indicators.series_mean(keys::OBV),
        ) {
            (Some(obv), Some(mean)) if obv > mean => {
                ReadoutRow::new("OBV", "positive volume pressure", Bias::Bullish)
            }
            (Some(_), Some(_)) => {
                ReadoutRow::new("OBV", "negative volume pressure", Bias::Bearish)
            }
            _ => ReadoutRow::no_signal("OBV"),
        },
    );

    rows
}

/// Reduce the readout rows to an overall lean.
///
/// Majority vote: more bullish rows than bearish reads bullish, more
/// bearish reads bearish, a tie (including the all-"no signal" table) is
/// neutral. This is the "overall signal" headline the dashboards print
/// above the table.
pub fn readout_consensus(rows: &[ReadoutRow]) -> Bias {
    let bullish = rows.iter().filter(|r| r.bias == Bias::Bullish).count();
    let bearish = rows.iter().filter(|r| r.bias == Bias::Bearish).count();
    if bullish > bearish {
        Bias::Bullish
    } else if bearish > bullish {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

fn cross_row(indicator: &'static str, fast: Option<f64>, slow: Option<f64>) -> ReadoutRow {
    match (fast, slow) {
        (Some(f), Some(s)) if f > s => {
            ReadoutRow::new(indicator, "golden cross (buy)", Bias::Bullish)
        }
        (Some(f), Some(s)) if f < s => {
            ReadoutRow::new(indicator, "death cross (sell)", Bias::Bearish)
        }
        (Some(_), Some(_)) => ReadoutRow::no_signal(indicator),
        _ => ReadoutRow::no_signal(indicator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use crate::indicators::make_bars;

    fn series_of(closes: &[f64]) -> Series {
        Series::new("TEST", Interval::Min5, make_bars(closes)).unwrap()
    }

    fn set_with(entries: &[(&str, f64)], n: usize) -> IndicatorSet {
        let mut set = IndicatorSet::new();
        for &(name, value) in entries {
            let mut values = vec![f64::NAN; n.saturating_sub(1)];
            values.push(value);
            set.insert(name, values);
        }
        set
    }

    #[test]
    fn readout_has_one_row_per_indicator() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let rows = indicator_readout(&series, &IndicatorSet::new());
        assert_eq!(rows.len(), 8);
        // With no indicator data everything reads "no signal".
        assert!(rows.iter().all(|r| r.bias == Bias::Neutral));
    }

    #[test]
    fn rsi_bands() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let rows = indicator_readout(&series, &set_with(&[(keys::RSI, 25.0)], 3));
        assert_eq!(rows[0].bias, Bias::Bullish);
        let rows = indicator_readout(&series, &set_with(&[(keys::RSI, 75.0)], 3));
        assert_eq!(rows[0].bias, Bias::Bearish);
        let rows = indicator_readout(&series, &set_with(&[(keys::RSI, 50.0)], 3));
        assert_eq!(rows[0].bias, Bias::Neutral);
    }

    #[test]
    fn bollinger_touches() {
        let series = series_of(&[100.0, 101.0, 102.0]); // close 102
        let rows = indicator_readout(
            &series,
            &set_with(
                &[(keys::BOLLINGER_LOWER, 103.0), (keys::BOLLINGER_UPPER, 110.0)],
                3,
            ),
        );
        assert_eq!(rows[2].bias, Bias::Bullish); // close below lower band

        let rows = indicator_readout(
            &series,
            &set_with(
                &[(keys::BOLLINGER_LOWER, 90.0), (keys::BOLLINGER_UPPER, 101.0)],
                3,
            ),
        );
        assert_eq!(rows[2].bias, Bias::Bearish); // close above upper band
    }

    #[test]
    fn stochastic_requires_both_lines_in_band() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let rows = indicator_readout(
            &series,
            &set_with(&[(keys::STOCH_K, 15.0), (keys::STOCH_D, 18.0)], 3),
        );
        assert_eq!(rows[3].bias, Bias::Bullish);
        // %K oversold but %D not: no signal.
        let rows = indicator_readout(
            &series,
            &set_with(&[(keys::STOCH_K, 15.0), (keys::STOCH_D, 40.0)], 3),
        );
        assert_eq!(rows[3].bias, Bias::Neutral);
    }

    #[test]
    fn sma_cross_rows() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let rows = indicator_readout(
            &series,
            &set_with(&[(keys::SMA_50, 105.0), (keys::SMA_200, 100.0)], 3),
        );
        assert_eq!(rows[4].bias, Bias::Bullish);
        assert!(rows[4].label.contains("golden"));

        let rows = indicator_readout(
            &series,
            &set_with(&[(keys::SMA_50, 95.0), (keys::SMA_200, 100.0)], 3),
        );
        assert_eq!(rows[4].bias, Bias::Bearish);
        assert!(rows[4].label.contains("death"));
    }

    #[test]
    fn consensus_follows_row_majority() {
        let series = series_of(&[100.0, 101.0, 102.0]);

        // RSI oversold + SMA golden cross vs EMA death cross: 2 bullish, 1 bearish.
        let rows = indicator_readout(
            &series,
            &set_with(
                &[
                    (keys::RSI, 25.0),
                    (keys::SMA_50, 105.0),
                    (keys::SMA_200, 100.0),
                    (keys::EMA_50, 95.0),
                    (keys::EMA_200, 100.0),
                ],
                3,
            ),
        );
        assert_eq!(readout_consensus(&rows), Bias::Bullish);

        // RSI overbought alone: 1 bearish, 0 bullish.
        let rows = indicator_readout(&series, &set_with(&[(keys::RSI, 75.0)], 3));
        assert_eq!(readout_consensus(&rows), Bias::Bearish);

        // Golden cross vs overbought RSI: tie.
        let rows = indicator_readout(
            &series,
            &set_with(
                &[
                    (keys::RSI, 75.0),
                    (keys::SMA_50, 105.0),
                    (keys::SMA_200, 100.0),
                ],
                3,
            ),
        );
        assert_eq!(readout_consensus(&rows), Bias::Neutral);
    }

    #[test]
    fn consensus_of_empty_table_is_neutral() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let rows = indicator_readout(&series, &IndicatorSet::new());
        assert_eq!(readout_consensus(&rows), Bias::Neutral);
        assert_eq!(readout_consensus(&[]), Bias::Neutral);
    }

    #[test]
    fn atr_and_obv_compare_to_own_mean() {
        let series = series_of(&[100.0, 101.0, 102.0]);
        let mut set = IndicatorSet::new();
        set.insert(keys::ATR, vec![1.0, 1.0, 4.0]); // mean 2, latest 4
        set.insert(keys::OBV, vec![0.0, -500.0, -700.0]); // mean -400, latest -700
        let rows = indicator_readout(&series, &set);
        assert_eq!(rows[6].label, "high volatility");
        assert_eq!(rows[7].bias, Bias::Bearish);
    }
}
