//! Time-of-day admission filter.
//!
//! The strategy only enters during configured intraday windows (the defaults
//! avoid the volatile 09:00–11:00 open). Windows are validated once at
//! construction; admission checks are pure.

use crate::config::ConfigError;
use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

/// One intraday admission window, inclusive at both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl Window {
    pub const fn new(start_hour: u8, start_minute: u8, end_hour: u8, end_minute: u8) -> Self {
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    fn start_minutes(&self) -> u16 {
        self.start_hour as u16 * 60 + self.start_minute as u16
    }

    fn end_minutes(&self) -> u16 {
        self.end_hour as u16 * 60 + self.end_minute as u16
    }
}

/// Validated set of admission windows. Overlap carries no special meaning —
/// a timestamp is admitted if any window contains it (union semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingWindows {
    windows: Vec<Window>,
}

impl TradingWindows {
    /// Validate and construct. Each window needs in-range time components and
    /// an end strictly after its start.
    pub fn new(windows: Vec<Window>) -> Result<Self, ConfigError> {
        for (index, window) in windows.iter().enumerate() {
            if window.start_hour > 23
                || window.end_hour > 23
                || window.start_minute > 59
                || window.end_minute > 59
            {
                return Err(ConfigError::WindowOutOfRange { index });
            }
            if window.end_minutes() <= window.start_minutes() {
                return Err(ConfigError::WindowEndNotAfterStart { index });
            }
        }
        Ok(Self { windows })
    }

    /// The strategy defaults: 11:00–12:30 and 13:30–15:30 exchange-local.
    pub fn default_strategy() -> Self {
        Self {
            windows: vec![Window::new(11, 0, 12, 30), Window::new(13, 30, 15, 30)],
        }
    }

    /// Whether the timestamp's time-of-day falls inside any window.
    pub fn admits(&self, timestamp: DateTime<FixedOffset>) -> bool {
        let minutes = (timestamp.hour() * 60 + timestamp.minute()) as u16;
        self.windows
            .iter()
            .any(|w| w.start_minutes() <= minutes && minutes <= w.end_minutes())
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }
}

impl Default for TradingWindows {
    fn default() -> Self {
        Self::default_strategy()
    }
}
