//! Data layer: the provider boundary and a CSV-backed candle source.
//!
//! The core performs no gap-filling or resampling — providers hand over an
//! ordered, deduplicated series and the simulator's validation rejects
//! anything malformed.

pub mod csv_source;
pub mod provider;

pub use csv_source::CsvCandleSource;
pub use provider::{CandleProvider, CandleRequest, DataError};
