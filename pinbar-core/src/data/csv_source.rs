//! CSV-backed candle source.
//!
//! Expects a header row `timestamp,open,high,low,close` with RFC 3339
//! timestamps (offset included) and decimal prices. Extra columns such as
//! `volume` are ignored.

use crate::domain::Candle;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::provider::{CandleProvider, CandleRequest, DataError};

#[derive(Debug, Deserialize)]
struct CandleRow {
    timestamp: DateTime<FixedOffset>,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
}

impl From<CandleRow> for Candle {
    fn from(row: CandleRow) -> Self {
        Candle {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
        }
    }
}

/// Candle source reading a single-instrument CSV export.
#[derive(Debug, Clone)]
pub struct CsvCandleSource {
    path: PathBuf,
}

impl CsvCandleSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the whole file, sorted and deduplicated by timestamp.
    pub fn load(&self) -> Result<Vec<Candle>, DataError> {
        let file = File::open(&self.path)?;
        read_candles(file)
    }
}

impl CandleProvider for CsvCandleSource {
    /// The file covers a single instrument, so only the date range of the
    /// request is applied.
    fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>, DataError> {
        let mut candles = self.load()?;
        candles.retain(|c| request.from <= c.timestamp && c.timestamp <= request.to);
        Ok(candles)
    }
}

/// Parse candles from any reader, sorting by timestamp and dropping exact
/// timestamp duplicates (first occurrence wins).
pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut candles = Vec::new();
    for row in csv_reader.deserialize::<CandleRow>() {
        candles.push(Candle::from(row?));
    }
    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);
    Ok(candles)
}
