//! Candle provider trait and structured error types.
//!
//! The trait abstracts over data sources (CSV export, broker history API) so
//! backtests can swap implementations and tests can use in-memory series. The
//! core never retries or guesses on failure — errors surface to the caller,
//! who decides whether to re-fetch or re-authenticate.

use crate::domain::Candle;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// What to fetch: one instrument, one interval, one date range.
#[derive(Debug, Clone)]
pub struct CandleRequest {
    /// Instrument key, e.g. `"NSE_INDEX|Nifty 50"`.
    pub instrument: String,
    pub interval_minutes: u32,
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
}

/// Structured errors from external data collaborators.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("authentication expired or missing: {0}")]
    AuthenticationExpired(String),

    #[error("instrument not found: {instrument}")]
    InstrumentNotFound { instrument: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Trait for candle sources.
///
/// Implementations return candles sorted by timestamp with duplicates removed,
/// restricted to the request's range. Content validity (monotonic timestamps,
/// sane OHLC) is enforced downstream by the simulator.
pub trait CandleProvider {
    fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>, DataError>;
}
