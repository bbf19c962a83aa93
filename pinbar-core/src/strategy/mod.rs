//! Strategy components: pattern classifier, time-window filter, EMA trend gate.
//!
//! Everything here is a pure function of candle data and an explicit config —
//! no portfolio or position state ever reaches a strategy component.

pub mod ema;
pub mod pin_bar;
pub mod time_filter;

pub use ema::{ema_series, Ema};
pub use pin_bar::{classify, PinBarConfig, Signal};
pub use time_filter::{TradingWindows, Window};
