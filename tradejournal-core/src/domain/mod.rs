//! Domain types for the trade journal.

pub mod month;
pub mod trade;

pub use month::Month;
pub use trade::{TradeRecord, UNKNOWN_INSTRUMENT};
