//! Trade Journal Core: domain types, CSV loading, metrics aggregation.
//!
//! This crate holds the first two pipeline stages:
//! - Loader: delimited journal export → [`domain::TradeRecord`]s, with
//!   runtime column discovery and skip-and-count handling of bad rows
//! - Aggregator: records → [`aggregate::AggregateReport`] (cumulative P/L,
//!   monthly rollups, best days, instrument ranking, trade statistics)
//! - Configuration shared by every stage

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod loader;

pub use aggregate::{AggregateReport, Aggregator, CumulativePoint, TradeStats};
pub use config::{AggregateConfig, ConfigError, InputConfig, JournalConfig, OutputConfig};
pub use domain::{Month, TradeRecord};
pub use loader::{
    load_trades, read_trades, LoadError, LoadOptions, LoadedJournal, RowIssue, RowParseWarning,
};
