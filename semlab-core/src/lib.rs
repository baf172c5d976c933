//! Semlab Core — the dashboard data pipeline.
//!
//! Everything between the two raw CSV feeds and the presentation layer:
//! - Lenient CSV decoding into ordered header→value rows
//! - Catalog and price-series normalization
//! - Sector peer resolution
//! - Trailing timeframe filtering
//! - Rebase-to-100 and period returns
//! - Session load state machine and snapshot sources
//!
//! UI rendering, chart widgets, and form controls are external collaborators
//! that consume this crate's output; `semlab-cli` is the reference consumer.

pub mod compare;
pub mod config;
pub mod data;
pub mod session;
