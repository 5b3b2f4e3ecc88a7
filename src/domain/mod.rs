//! Domain types: bars, series, intervals, verdicts.

pub mod bar;
pub mod interval;
pub mod series;
pub mod verdict;

pub use bar::Bar;
pub use interval::{Interval, ParseIntervalError};
pub use series::{Series, SeriesError};
pub use verdict::{Signal, Verdict, WeightedVerdict};
