//! Zodiac Ledger
//!
//! A small web service that records zodiac sign pairings with a duration in
//! days and serves an aggregate report over everything recorded:
//! - Fixed twelve-sign vocabulary with canonical pair ordering
//! - Form validation (sign membership + bounded integer duration)
//! - SQLite persistence behind a store trait
//! - Grouping/reduction report (per-pair sums, max/min pair, overall mean)
//! - PNG line chart embedded in the report page

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod flash;
pub mod server;
pub mod signs;
pub mod store;
pub mod validate;

// Re-exports for convenience
pub use aggregate::{aggregate as aggregate_records, AggregateReport};
pub use signs::Sign;
pub use store::{Record, RecordStore, SqliteRecordStore};
