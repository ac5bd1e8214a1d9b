//! Domain types: input samples and the time series the engine reads.

pub mod sample;
pub mod series;

pub use sample::{Field, Sample};
pub use series::TimeSeries;
